//! Ordered skill registry.
//!
//! # Responsibility
//! - Allocate skill ids and keep the user-controlled display order.
//!
//! # Invariants
//! - Vector position is the display order; it holds each id exactly once.
//! - Name uniqueness is checked only on `add`, against current skills.
//! - `next_id` is greater than every id ever allocated since the last
//!   `replace_all`.

use crate::model::skill::{normalize_name, Skill, SkillId};
use crate::store::{allocate_id, next_id_after, StoreError, StoreResult};

/// Skills in display order plus the id allocator.
#[derive(Debug, Clone)]
pub struct SkillRegistry {
    skills: Vec<Skill>,
    next_id: SkillId,
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self {
            skills: Vec::new(),
            next_id: 1,
        }
    }
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a skill and returns its new id.
    ///
    /// # Errors
    /// - `BlankSkillName` when `name` trims to empty.
    /// - `DuplicateSkillName` when a current skill has the same trimmed name.
    /// - `IdsExhausted` when the allocator has no ids left.
    pub fn add(&mut self, name: &str) -> StoreResult<SkillId> {
        let name = normalize_name(name).ok_or(StoreError::BlankSkillName)?;
        if self.skills.iter().any(|skill| skill.name == name) {
            return Err(StoreError::DuplicateSkillName(name));
        }

        let id = allocate_id(&mut self.next_id)?;
        self.skills.push(Skill::new(id, name));
        Ok(id)
    }

    /// Renames in place. Returns `false` for blank names or unknown ids.
    pub fn rename(&mut self, id: SkillId, name: &str) -> bool {
        let Some(name) = normalize_name(name) else {
            return false;
        };
        match self.skills.iter_mut().find(|skill| skill.id == id) {
            Some(skill) => {
                skill.name = name;
                true
            }
            None => false,
        }
    }

    /// Swaps the skill at `position` with the one at `position + delta`.
    ///
    /// Returns `false` when either index is out of bounds.
    pub fn move_skill(&mut self, position: usize, delta: isize) -> bool {
        if position >= self.skills.len() {
            return false;
        }
        let Some(target) = position.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.skills.len() {
            return false;
        }
        self.skills.swap(position, target);
        true
    }

    /// Removes a skill and returns it, or `None` for unknown ids.
    pub fn remove(&mut self, id: SkillId) -> Option<Skill> {
        let index = self.position(id)?;
        Some(self.skills.remove(index))
    }

    /// Replaces contents wholesale and resets the allocator to `max + 1`.
    ///
    /// Callers validate id uniqueness beforehand.
    pub fn replace_all(&mut self, skills: Vec<Skill>) {
        self.next_id = next_id_after(skills.iter().map(|skill| skill.id));
        self.skills = skills;
    }

    /// Replaces contents without rewinding the allocator.
    ///
    /// The counter becomes `max(current, max id + 1)`.
    pub fn install(&mut self, skills: Vec<Skill>) {
        self.next_id = self
            .next_id
            .max(next_id_after(skills.iter().map(|skill| skill.id)));
        self.skills = skills;
    }

    pub fn get(&self, id: SkillId) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn contains(&self, id: SkillId) -> bool {
        self.get(id).is_some()
    }

    /// Display position of `id`.
    pub fn position(&self, id: SkillId) -> Option<usize> {
        self.skills.iter().position(|skill| skill.id == id)
    }

    /// Skills in display order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn ids(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.skills.iter().map(|skill| skill.id)
    }

    pub fn next_id(&self) -> SkillId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
