//! Default task and reward catalog.
//!
//! New children get a fixed base list of routines and behaviors, extended
//! at ages 5, 7 and 9. Tiers only ever append, so an older child's list is
//! always a superset of a younger child's.

use serde::Serialize;

use super::model::{Child, Reward, Task, TaskCategory, TaskType};

/// A task definition before it is assigned to a child.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TaskTemplate {
    pub name: &'static str,
    pub task_type: TaskType,
    pub category: TaskCategory,
    pub points: u32,
    pub icon: &'static str,
}

const fn chore(
    name: &'static str,
    category: TaskCategory,
    points: u32,
    icon: &'static str,
) -> TaskTemplate {
    TaskTemplate {
        name,
        task_type: TaskType::Chore,
        category,
        points,
        icon,
    }
}

const fn behavior(name: &'static str, points: u32, icon: &'static str) -> TaskTemplate {
    TaskTemplate {
        name,
        task_type: TaskType::Behavior,
        category: TaskCategory::Values,
        points,
        icon,
    }
}

const BASE_TEMPLATES: &[TaskTemplate] = &[
    chore("Get dressed", TaskCategory::Morning, 10, "👕"),
    chore("Brush teeth (AM)", TaskCategory::Morning, 10, "🦷"),
    chore("Make bed", TaskCategory::Morning, 15, "🛏️"),
    chore("Put away backpack", TaskCategory::Afternoon, 10, "🎒"),
    chore("Homework", TaskCategory::Afternoon, 20, "📚"),
    chore("Clean up toys", TaskCategory::Evening, 15, "🧸"),
    chore("Brush teeth (PM)", TaskCategory::Evening, 10, "🦷"),
    chore("Put clothes in hamper", TaskCategory::Evening, 10, "🧺"),
    behavior("Showed kindness", 25, "💝"),
    behavior("Took responsibility", 30, "🎯"),
    behavior("Showed perseverance", 30, "💪"),
    behavior("Helped without being asked", 35, "🌟"),
    behavior("Shared with sibling", 25, "🤝"),
];

/// Extra templates unlocked at a minimum age, in ascending age order.
const AGE_TIERS: &[(u32, &[TaskTemplate])] = &[
    (
        5,
        &[
            chore("Set the table", TaskCategory::Household, 20, "🍽️"),
            chore("Feed pet", TaskCategory::Household, 15, "🐕"),
        ],
    ),
    (
        7,
        &[
            chore("Empty dishwasher", TaskCategory::Household, 25, "🧼"),
            chore("Take out trash", TaskCategory::Household, 20, "🗑️"),
        ],
    ),
    (
        9,
        &[
            chore("Vacuum room", TaskCategory::Household, 30, "🧹"),
            chore("Do laundry", TaskCategory::Household, 40, "👔"),
        ],
    ),
];

/// Avatars offered during setup, cycled by entry index.
pub const AVATARS: &[&str] = &["🦄", "🦖", "🐱", "🐶", "🦊", "🐼", "🦁", "🐯", "🐸", "🐙"];

/// Default avatar for the `index`-th child entered during setup.
pub fn default_avatar(index: usize) -> &'static str {
    AVATARS[index % AVATARS.len()]
}

/// Generate the ordered task templates for a child of the given age.
pub fn generate(age: u32) -> Vec<TaskTemplate> {
    let mut templates = BASE_TEMPLATES.to_vec();
    for (min_age, tier) in AGE_TIERS {
        if age >= *min_age {
            templates.extend_from_slice(tier);
        }
    }
    templates
}

/// Assign the catalog for the child's age to that child.
///
/// Ids are `task-<childId>-<index>` in catalog order, so regenerating for
/// the same child yields the same ids.
pub fn tasks_for_child(child: &Child) -> Vec<Task> {
    generate(child.age)
        .into_iter()
        .enumerate()
        .map(|(idx, template)| Task {
            id: format!("task-{}-{}", child.id, idx),
            child_id: child.id.clone(),
            name: template.name.to_string(),
            task_type: template.task_type,
            category: template.category,
            points: template.points,
            icon: template.icon.to_string(),
        })
        .collect()
}

/// The default reward catalog.
pub fn default_rewards() -> Vec<Reward> {
    [
        ("r1", "30 min screen time", 50, "📱"),
        ("r2", "Choose dinner", 100, "🍕"),
        ("r3", "Stay up 30 min late", 150, "🌙"),
        ("r4", "Special dessert", 75, "🍰"),
        ("r5", "Friend playdate", 200, "🎉"),
        ("r6", "Pick family movie", 100, "🎬"),
    ]
    .into_iter()
    .map(|(id, name, cost, icon)| Reward {
        id: id.to_string(),
        name: name.to_string(),
        cost,
        icon: icon.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_catalog_for_young_child() {
        let templates = generate(4);
        assert_eq!(templates.len(), 13);
        assert!(templates
            .iter()
            .all(|t| t.category != TaskCategory::Household));
        assert_eq!(templates[0].name, "Get dressed");
    }

    #[test]
    fn test_age_thresholds() {
        assert_eq!(generate(5).len(), 15);
        assert_eq!(generate(6).len(), 15);
        assert_eq!(generate(7).len(), 17);
        assert_eq!(generate(9).len(), 19);
        assert_eq!(generate(14).len(), 19);
    }

    #[test]
    fn test_tiers_append_after_base() {
        let templates = generate(9);
        assert_eq!(templates[13].name, "Set the table");
        assert_eq!(templates[18].name, "Do laundry");
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(generate(8), generate(8));
    }

    #[test]
    fn test_behaviors_are_values() {
        for template in generate(9) {
            if template.task_type == TaskType::Behavior {
                assert_eq!(template.category, TaskCategory::Values);
            }
        }
    }

    #[test]
    fn test_tasks_for_child_ids() {
        let child = Child::new("child-1", "Ada", 7, "🦊");
        let tasks = tasks_for_child(&child);
        assert_eq!(tasks.len(), 17);
        assert_eq!(tasks[0].id, "task-child-1-0");
        assert_eq!(tasks[16].id, "task-child-1-16");
        assert!(tasks.iter().all(|t| t.child_id == "child-1"));
    }

    #[test]
    fn test_default_rewards() {
        let rewards = default_rewards();
        assert_eq!(rewards.len(), 6);
        assert!(rewards.iter().all(|r| r.cost > 0));
        assert_eq!(rewards[0].cost, 50);
    }

    #[test]
    fn test_default_avatar_cycles() {
        assert_eq!(default_avatar(0), "🦄");
        assert_eq!(default_avatar(10), "🦄");
        assert_eq!(default_avatar(4), "🦊");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: an older child's catalog contains every younger template
            #[test]
            fn prop_catalog_monotonic(younger in 1u32..20, extra in 0u32..20) {
                let small = generate(younger);
                let large = generate(younger + extra);
                prop_assert!(large.len() >= small.len());
                for template in &small {
                    prop_assert!(large.contains(template));
                }
                // Tiers append, so the younger list is a prefix
                prop_assert_eq!(&large[..small.len()], &small[..]);
            }
        }
    }
}
