//! The search that binds the four queue roles to concrete queues.
//!
//! Each role filters the family table into two candidate tiers and walks the
//! better tier with a cursor. One greedy pass assigns every role in fixed
//! order, dragging along peers that sit on the same family. When a role runs
//! into a fully booked family, exactly one unresolved cursor is advanced and
//! the pass reruns. Cursors only ever move forward, so the search is finite,
//! and since nothing in here draws on anything but the family table the result
//! is the same on every run.

use smallvec::SmallVec;

use crate::{
    family::FamilyInfo,
    indices::{QueueFamilyIndices, QueueSlot},
    roles::Role,
};

///One eligible family for a role, in family table order.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    family: u32,
    queue_count: u32,
}

///The candidate tiers of one role. `combined` holds the families that also
/// fulfill the role's preference, `exclusive` the ones that only meet the hard
/// requirement.
#[derive(Debug, Default)]
struct Candidates {
    exclusive: SmallVec<[Candidate; 4]>,
    combined: SmallVec<[Candidate; 4]>,
}

impl Candidates {
    fn collect(role: Role, families: &[FamilyInfo]) -> Self {
        let mut candidates = Candidates::default();
        for family in families {
            if !role.required(family) {
                continue;
            }

            let candidate = Candidate {
                family: family.index,
                queue_count: family.queue_count,
            };
            if role.preferred(family) {
                candidates.combined.push(candidate);
            } else {
                candidates.exclusive.push(candidate);
            }
        }

        candidates
    }

    ///The list the cursor walks. Combined matches win over exclusive ones.
    fn active(&self) -> &[Candidate] {
        if self.combined.is_empty() {
            &self.exclusive
        } else {
            &self.combined
        }
    }
}

///Search state of one role.
#[derive(Debug)]
struct RoleCursor {
    candidates: Candidates,
    ///Position inside the active candidate list.
    cursor: usize,
    resolved: Option<QueueSlot>,
}

impl RoleCursor {
    fn current(&self) -> Option<Candidate> {
        self.candidates.active().get(self.cursor).copied()
    }

    fn can_advance(&self) -> bool {
        self.cursor + 1 < self.candidates.active().len()
    }

    ///Whether the role could live on `family` at all, i.e. the hard
    /// requirement holds there.
    fn allows_family(&self, family: u32) -> bool {
        self.candidates
            .exclusive
            .iter()
            .chain(self.candidates.combined.iter())
            .any(|candidate| candidate.family == family)
    }

    fn resolved_to(&self, family: u32) -> bool {
        matches!(self.resolved, Some(slot) if slot.family == family)
    }
}

///Working state of one resolution run. Exactly one cursor per role, owned for
/// the duration of the run and folded into the immutable result afterwards.
struct ResolutionState {
    roles: [RoleCursor; 4],
}

impl ResolutionState {
    fn new(families: &[FamilyInfo]) -> Self {
        ResolutionState {
            roles: Role::ALL.map(|role| RoleCursor {
                candidates: Candidates::collect(role, families),
                cursor: 0,
                resolved: None,
            }),
        }
    }

    fn role(&self, role: Role) -> &RoleCursor {
        &self.roles[role.idx()]
    }

    fn role_mut(&mut self, role: Role) -> &mut RoleCursor {
        &mut self.roles[role.idx()]
    }

    fn is_complete(&self) -> bool {
        self.roles.iter().all(|role| role.resolved.is_some())
    }

    ///One greedy pass over all unresolved roles in fixed order. Returns true
    /// once every role holds a slot.
    fn try_assign(&mut self) -> bool {
        for role in Role::ALL {
            if self.role(role).resolved.is_some() {
                continue;
            }

            let Some(candidate) = self.role(role).current() else {
                // No family fulfills the hard requirement, the device is out.
                return false;
            };

            // Queues already taken on this family by peers that insist on an
            // index of their own.
            let occupied = role
                .bump_peers()
                .iter()
                .filter(|peer| self.role(**peer).resolved_to(candidate.family))
                .count() as u32;

            if candidate.queue_count > occupied {
                self.claim(role, candidate, occupied);
            } else {
                // Family is fully booked for this role. Move one cursor and
                // rerun the pass.
                return self.try_increment();
            }
        }

        self.is_complete()
    }

    ///Claims `candidate` for `role` at `queue_index` and drags along unresolved
    /// peers that sit on the same family.
    fn claim(&mut self, role: Role, candidate: Candidate, queue_index: u32) {
        let slot = QueueSlot {
            family: candidate.family,
            queue_count: candidate.queue_count,
            queue_index,
        };

        // Peers that may share the exact queue take the same index, provided
        // the family fulfills their own requirement.
        for peer in role.share_peers() {
            if self.role(*peer).resolved.is_none()
                && self.role(*peer).allows_family(candidate.family)
            {
                self.role_mut(*peer).resolved = Some(slot);
                #[cfg(feature = "logging")]
                log::trace!(
                    "{:?} shares queue {} of family {} with {:?}",
                    peer,
                    queue_index,
                    candidate.family,
                    role
                );
            }
        }

        self.role_mut(role).resolved = Some(slot);

        // Peers currently pointing at the same family grab the following
        // indices while the family has queues left. Whoever does not fit stays
        // unresolved and is dealt with by a later pass iteration.
        let mut next = queue_index + 1;
        for peer in role.bump_peers() {
            if next >= candidate.queue_count {
                break;
            }
            if self.role(*peer).resolved.is_none()
                && self.role(*peer).current().map(|current| current.family)
                    == Some(candidate.family)
            {
                self.role_mut(*peer).resolved = Some(QueueSlot {
                    family: candidate.family,
                    queue_count: candidate.queue_count,
                    queue_index: next,
                });
                next += 1;
            }
        }
    }

    ///Single step backtracking: advance the first unresolved cursor that still
    /// has candidates left and rerun the assignment pass. On failure the cursor
    /// is put back and the next one is tried.
    fn try_increment(&mut self) -> bool {
        for role in Role::ALL {
            if self.role(role).resolved.is_none() && self.role(role).can_advance() {
                self.role_mut(role).cursor += 1;
                #[cfg(feature = "logging")]
                log::trace!(
                    "{:?} is blocked, advancing to candidate {}",
                    role,
                    self.role(role).cursor
                );

                if self.try_assign() {
                    return true;
                }

                self.role_mut(role).cursor -= 1;
            }
        }

        false
    }

    fn into_indices(self) -> QueueFamilyIndices {
        let mut indices = QueueFamilyIndices::default();
        for (role, state) in Role::ALL.into_iter().zip(self.roles) {
            if let Some(slot) = state.resolved {
                indices.set(role, slot);
            }
        }

        indices
    }
}

impl QueueFamilyIndices {
    ///Assigns every role a `(family, queue index)` pair from the given family
    /// table.
    ///
    /// Never fails: on a device where no full assignment exists the result is
    /// incomplete, check [is_complete](QueueFamilyIndices::is_complete). Such
    /// a device should simply be skipped during selection.
    pub fn resolve(families: &[FamilyInfo]) -> QueueFamilyIndices {
        let mut state = ResolutionState::new(families);

        // A role without any eligible family can never resolve.
        if Role::ALL
            .iter()
            .any(|role| state.role(*role).current().is_none())
        {
            #[cfg(feature = "logging")]
            log::debug!("at least one queue role has no eligible family, device is unsuitable");
            return QueueFamilyIndices::default();
        }

        let _complete = state.try_assign();
        #[cfg(feature = "logging")]
        log::debug!(
            "queue role resolution over {} families {}",
            families.len(),
            if _complete { "complete" } else { "incomplete" }
        );

        state.into_indices()
    }
}
