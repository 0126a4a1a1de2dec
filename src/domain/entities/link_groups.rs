//! Link group entity
//!
//! Pure membership bookkeeping for linked tree instances: which ids share a
//! tree, who leads each group, and how groups merge and dissolve. Holds no tree
//! state; the coordinator pairs each [`GroupId`] with the shared collection.
//!
//! Groups are a list of ordered member lists scanned linearly, which is plenty
//! for a handful of tabs. The first member of a group is its leader.

use crate::domain::value_objects::InstanceId;

/// Identifier of one link group, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

/// Link state of a single instance id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Unlinked,
    Member(GroupId),
}

/// A set of two or more linked instance ids, leader first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkGroup {
    id: GroupId,
    members: Vec<InstanceId>,
}

impl LinkGroup {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn leader(&self) -> &InstanceId {
        &self.members[0]
    }

    pub fn members(&self) -> &[InstanceId] {
        &self.members
    }

    pub fn contains(&self, id: &InstanceId) -> bool {
        self.members.contains(id)
    }

    /// Every member except `id`
    pub fn peers_of(&self, id: &InstanceId) -> Vec<InstanceId> {
        self.members.iter().filter(|m| *m != id).cloned().collect()
    }
}

/// What [`LinkGroups::link`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Both ids already in the same group, or an id linked to itself
    Unchanged,
    /// Two unlinked ids formed a new group
    Created(GroupId),
    /// An unlinked id was appended to an existing group
    Joined { group: GroupId, member: InstanceId },
    /// Two groups were replaced by one containing both member lists
    Merged {
        group: GroupId,
        retired: [GroupId; 2],
    },
}

/// What [`LinkGroups::unlink`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlinkOutcome {
    NotLinked,
    /// The group survives with two or more members
    Left {
        group: GroupId,
        leader_changed: bool,
    },
    /// Fewer than two members remained; `orphan` is the one left behind
    Dissolved {
        group: GroupId,
        orphan: Option<InstanceId>,
    },
}

/// All link groups, pairwise disjoint
#[derive(Debug, Clone, Default)]
pub struct LinkGroups {
    groups: Vec<LinkGroup>,
    next_id: u64,
}

impl LinkGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, id: GroupId) -> Option<&LinkGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn group_of(&self, id: &InstanceId) -> Option<&LinkGroup> {
        self.groups.iter().find(|g| g.contains(id))
    }

    pub fn state_of(&self, id: &InstanceId) -> LinkState {
        match self.group_of(id) {
            Some(group) => LinkState::Member(group.id),
            None => LinkState::Unlinked,
        }
    }

    /// Every linked id, group by group
    pub fn linked_ids(&self) -> Vec<InstanceId> {
        self.groups
            .iter()
            .flat_map(|g| g.members.iter().cloned())
            .collect()
    }

    /// Persistable form: ordered groups of ordered ids
    pub fn to_records(&self) -> Vec<Vec<InstanceId>> {
        self.groups.iter().map(|g| g.members.clone()).collect()
    }

    /// Link `a` and `b`.
    pub fn link(&mut self, a: &InstanceId, b: &InstanceId) -> LinkOutcome {
        if a == b {
            return LinkOutcome::Unchanged;
        }
        let ga = self.index_of(a);
        let gb = self.index_of(b);
        match (ga, gb) {
            (None, None) => {
                let id = self.push_group(vec![a.clone(), b.clone()]);
                LinkOutcome::Created(id)
            }
            (Some(i), None) => self.join(i, b),
            (None, Some(j)) => self.join(j, a),
            (Some(i), Some(j)) if i == j => LinkOutcome::Unchanged,
            (Some(i), Some(j)) => {
                let first = self.groups[i].clone();
                let second = self.groups[j].clone();
                self.groups.retain(|g| g.id != first.id && g.id != second.id);

                let mut members = first.members;
                members.extend(second.members);
                let group = self.push_group(members);
                LinkOutcome::Merged {
                    group,
                    retired: [first.id, second.id],
                }
            }
        }
    }

    /// Remove `id` from its group, dissolving the group if it drops below two.
    pub fn unlink(&mut self, id: &InstanceId) -> UnlinkOutcome {
        let Some(index) = self.index_of(id) else {
            return UnlinkOutcome::NotLinked;
        };
        let group = &mut self.groups[index];
        let was_leader = group.leader() == id;
        group.members.retain(|m| m != id);

        let group_id = group.id;
        if group.members.len() < 2 {
            let orphan = group.members.pop();
            self.groups.remove(index);
            UnlinkOutcome::Dissolved {
                group: group_id,
                orphan,
            }
        } else {
            UnlinkOutcome::Left {
                group: group_id,
                leader_changed: was_leader,
            }
        }
    }

    /// Replace every group. Duplicate ids keep their first occurrence and
    /// groups left with fewer than two members are dropped.
    pub fn replace_all(&mut self, records: Vec<Vec<InstanceId>>) -> Vec<GroupId> {
        self.groups.clear();
        let mut seen: Vec<InstanceId> = Vec::new();
        let mut created = Vec::new();
        for record in records {
            let mut members = Vec::with_capacity(record.len());
            for id in record {
                if !seen.contains(&id) {
                    seen.push(id.clone());
                    members.push(id);
                }
            }
            if members.len() >= 2 {
                created.push(self.push_group(members));
            }
        }
        created
    }

    fn index_of(&self, id: &InstanceId) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(id))
    }

    fn join(&mut self, index: usize, member: &InstanceId) -> LinkOutcome {
        let group = &mut self.groups[index];
        group.members.push(member.clone());
        LinkOutcome::Joined {
            group: group.id,
            member: member.clone(),
        }
    }

    fn push_group(&mut self, members: Vec<InstanceId>) -> GroupId {
        let id = GroupId(self.next_id);
        self.next_id += 1;
        self.groups.push(LinkGroup { id, members });
        id
    }
}
