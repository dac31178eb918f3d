//! Single-entity query contract (C5): one five/seven-step template,
//! six entity kinds.

use crate::budget::{budget_cost, Budget};
use crate::domain::{
    domain_is_active, find_assignment_index, find_delta_index, find_hash_link_index, find_log_index,
    find_policy_index, find_zone_index, region_collapsed, Domain,
};
use crate::entity::{Assignment, HashLink, Log, Policy, RefusalReason, StateDelta, Zone};

/// Resolution strategy used to answer a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QueryResolution {
    Unset = 0,
    Analytic = 1,
}

impl Default for QueryResolution {
    fn default() -> Self {
        Self::Unset
    }
}

/// Confidence carried by a query's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QueryConfidence {
    Unset = 0,
    Unknown = 1,
    Exact = 2,
}

impl Default for QueryConfidence {
    fn default() -> Self {
        Self::Unset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QueryStatus {
    Refused = 0,
    Ok = 1,
}

impl Default for QueryStatus {
    fn default() -> Self {
        Self::Refused
    }
}

/// Per-query metadata: status, resolution strategy, confidence, the
/// semantic refusal reason (if any), the cost charged, and a snapshot
/// of the budget after the charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryMeta {
    pub status: QueryStatus,
    pub resolution: QueryResolution,
    pub confidence: QueryConfidence,
    pub refusal_reason: RefusalReason,
    pub cost_units: u32,
    pub budget_used: u32,
    pub budget_max: u32,
}

impl QueryMeta {
    pub(crate) fn refused(reason: RefusalReason, budget: &Budget) -> Self {
        Self {
            status: QueryStatus::Refused,
            resolution: QueryResolution::Unset,
            confidence: QueryConfidence::Unset,
            refusal_reason: reason,
            cost_units: 0,
            budget_used: budget.used(),
            budget_max: budget.max(),
        }
    }

    pub(crate) fn ok(resolution: QueryResolution, confidence: QueryConfidence, cost_units: u32, budget: &Budget) -> Self {
        Self {
            status: QueryStatus::Ok,
            resolution,
            confidence,
            refusal_reason: RefusalReason::None,
            cost_units,
            budget_used: budget.used(),
            budget_max: budget.max(),
        }
    }
}

macro_rules! single_entity_query {
    (
        $fn_name:ident,
        $sample:ident,
        $entity:ty,
        $find_index:ident,
        $table:ident,
        $missing_reason:expr,
        $collapsed_flags:expr
    ) => {
        #[doc = concat!("Single-entity query contract applied to `", stringify!($entity), "`.")]
        #[must_use]
        pub fn $fn_name(domain: &Domain, id: u32, budget: &mut Budget) -> $sample {
            let mut sample = $sample {
                entity: <$entity>::default(),
                meta: QueryMeta::default(),
            };
            sample.entity.flags = <$entity>::UNRESOLVED;

            if !domain_is_active(domain) {
                sample.meta = QueryMeta::refused(RefusalReason::DomainInactive, budget);
                return sample;
            }

            let cost = budget_cost(domain.policy.cost_full);
            if !budget.consume(cost) {
                sample.meta = QueryMeta::refused(RefusalReason::Budget, budget);
                return sample;
            }

            let Some(idx) = $find_index(domain, id) else {
                sample.meta = QueryMeta::refused($missing_reason, budget);
                return sample;
            };
            let entity = &domain.$table[idx];

            if region_collapsed(domain, region_id_of(entity)) {
                sample.entity = identity_only(entity, $collapsed_flags);
                sample.meta = QueryMeta::ok(QueryResolution::Analytic, QueryConfidence::Unknown, cost, budget);
                return sample;
            }

            sample.entity = entity.clone();
            sample.entity.flags = 0;
            sample.meta = QueryMeta::ok(QueryResolution::Analytic, QueryConfidence::Exact, cost, budget);
            sample
        }
    };
}

fn region_id_of<E: HasRegionId>(e: &E) -> u32 {
    e.region_id()
}

trait HasRegionId {
    fn region_id(&self) -> u32;
    fn identity_id(&self) -> u32;
}

impl HasRegionId for Zone {
    fn region_id(&self) -> u32 {
        self.region_id
    }
    fn identity_id(&self) -> u32 {
        self.srz_id
    }
}
impl HasRegionId for Assignment {
    fn region_id(&self) -> u32 {
        self.region_id
    }
    fn identity_id(&self) -> u32 {
        self.assignment_id
    }
}
impl HasRegionId for Policy {
    fn region_id(&self) -> u32 {
        self.region_id
    }
    fn identity_id(&self) -> u32 {
        self.policy_id
    }
}
impl HasRegionId for Log {
    fn region_id(&self) -> u32 {
        self.region_id
    }
    fn identity_id(&self) -> u32 {
        self.log_id
    }
}
impl HasRegionId for HashLink {
    fn region_id(&self) -> u32 {
        self.region_id
    }
    fn identity_id(&self) -> u32 {
        self.link_id
    }
}
impl HasRegionId for StateDelta {
    fn region_id(&self) -> u32 {
        self.region_id
    }
    fn identity_id(&self) -> u32 {
        self.delta_id
    }
}

/// Build the "collapsed" minimal sample: identity id, region id, and
/// the caller-supplied flags bit, nothing else. `Zone` and
/// `Assignment` use a dedicated `Collapsed` bit; every other kind
/// reuses its own `Unresolved` bit in this position, preserving a
/// genuine quirk of the original implementation rather than
/// normalizing it away.
fn identity_only<E>(entity: &E, flags: u32) -> E
where
    E: HasRegionId + Default,
    E: SetIdentity,
{
    let mut out = E::default();
    out.set_identity(entity.identity_id());
    out.set_region_id(entity.region_id());
    out.set_flags(flags);
    out
}

trait SetIdentity {
    fn set_identity(&mut self, id: u32);
    fn set_region_id(&mut self, region_id: u32);
    fn set_flags(&mut self, flags: u32);
}

impl SetIdentity for Zone {
    fn set_identity(&mut self, id: u32) {
        self.srz_id = id;
    }
    fn set_region_id(&mut self, region_id: u32) {
        self.region_id = region_id;
    }
    fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }
}
impl SetIdentity for Assignment {
    fn set_identity(&mut self, id: u32) {
        self.assignment_id = id;
    }
    fn set_region_id(&mut self, region_id: u32) {
        self.region_id = region_id;
    }
    fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }
}
impl SetIdentity for Policy {
    fn set_identity(&mut self, id: u32) {
        self.policy_id = id;
    }
    fn set_region_id(&mut self, region_id: u32) {
        self.region_id = region_id;
    }
    fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }
}
impl SetIdentity for Log {
    fn set_identity(&mut self, id: u32) {
        self.log_id = id;
    }
    fn set_region_id(&mut self, region_id: u32) {
        self.region_id = region_id;
    }
    fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }
}
impl SetIdentity for HashLink {
    fn set_identity(&mut self, id: u32) {
        self.link_id = id;
    }
    fn set_region_id(&mut self, region_id: u32) {
        self.region_id = region_id;
    }
    fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }
}
impl SetIdentity for StateDelta {
    fn set_identity(&mut self, id: u32) {
        self.delta_id = id;
    }
    fn set_region_id(&mut self, region_id: u32) {
        self.region_id = region_id;
    }
    fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZoneSample {
    pub entity: Zone,
    pub meta: QueryMeta,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentSample {
    pub entity: Assignment,
    pub meta: QueryMeta,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PolicySample {
    pub entity: Policy,
    pub meta: QueryMeta,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogSample {
    pub entity: Log,
    pub meta: QueryMeta,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HashLinkSample {
    pub entity: HashLink,
    pub meta: QueryMeta,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StateDeltaSample {
    pub entity: StateDelta,
    pub meta: QueryMeta,
}

single_entity_query!(
    zone_query,
    ZoneSample,
    Zone,
    find_zone_index,
    zones,
    RefusalReason::ZoneMissing,
    Zone::COLLAPSED
);

single_entity_query!(
    assignment_query,
    AssignmentSample,
    Assignment,
    find_assignment_index,
    assignments,
    RefusalReason::AssignmentMissing,
    Assignment::COLLAPSED
);

single_entity_query!(
    policy_query,
    PolicySample,
    Policy,
    find_policy_index,
    policies,
    RefusalReason::PolicyMissing,
    Policy::UNRESOLVED
);

single_entity_query!(
    log_query,
    LogSample,
    Log,
    find_log_index,
    logs,
    RefusalReason::LogMissing,
    Log::UNRESOLVED
);

single_entity_query!(
    hash_link_query,
    HashLinkSample,
    HashLink,
    find_hash_link_index,
    hash_links,
    RefusalReason::HashMissing,
    HashLink::UNRESOLVED
);

single_entity_query!(
    state_delta_query,
    StateDeltaSample,
    StateDelta,
    find_delta_index,
    deltas,
    RefusalReason::DeltaMissing,
    StateDelta::UNRESOLVED
);
