//! Instance index: template id -> instances still waiting to be bound

use std::collections::{BTreeMap, HashSet, VecDeque};

use uuid::Uuid;

use super::types::InstanceDescriptor;
use crate::error::{BranchError, BranchResult, OrphanedInstance};

/// An instance waiting for its template occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInstance {
    pub instance_id: Uuid,
    pub label: Option<String>,
}

/// Multi-valued map from template identifier to its unbound instances
///
/// Instances sharing a template keep their insertion order; binding always
/// consumes the front of the list so the rest stay in order.
#[derive(Debug, Default)]
pub struct InstanceIndex {
    by_template: BTreeMap<Uuid, VecDeque<PendingInstance>>,
    len: usize,
}

impl InstanceIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from every join row
    ///
    /// Fails on the first instance identity supplied twice.
    pub fn from_descriptors<I>(descriptors: I) -> BranchResult<Self>
    where
        I: IntoIterator<Item = InstanceDescriptor>,
    {
        let mut index = Self::new();
        let mut seen = HashSet::new();
        for descriptor in descriptors {
            if !seen.insert(descriptor.instance_id) {
                return Err(BranchError::DuplicateInstance {
                    instance_id: descriptor.instance_id,
                });
            }
            index.insert(descriptor);
        }
        Ok(index)
    }

    /// Append one descriptor behind those already stored for its template
    pub fn insert(&mut self, descriptor: InstanceDescriptor) {
        self.by_template
            .entry(descriptor.template_id)
            .or_default()
            .push_back(PendingInstance {
                instance_id: descriptor.instance_id,
                label: descriptor.label,
            });
        self.len += 1;
    }

    /// Whether any instance is still waiting for `template_id`
    pub fn has_instances(&self, template_id: &Uuid) -> bool {
        self.by_template.contains_key(template_id)
    }

    /// Remove and return the next instance of `template_id`
    pub fn take_next(&mut self, template_id: &Uuid) -> Option<PendingInstance> {
        let queue = self.by_template.get_mut(template_id)?;
        let instance = queue.pop_front();
        if queue.is_empty() {
            self.by_template.remove(template_id);
        }
        if instance.is_some() {
            self.len -= 1;
        }
        instance
    }

    /// Number of unbound instances
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fail with every leftover `(template, instance)` pair, if any
    pub fn ensure_consumed(self) -> BranchResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let orphans = self
            .by_template
            .into_iter()
            .flat_map(|(template_id, queue)| {
                queue.into_iter().map(move |instance| OrphanedInstance {
                    template_id,
                    instance_id: instance.instance_id,
                })
            })
            .collect();
        Err(BranchError::OrphanedInstances(orphans))
    }
}
