//! Pi-hole query status vocabulary and latency classification.
//!
//! The upstream API reports a fine-grained status string per query.
//! The exporter keeps the raw string for per-status breakdown tables
//! and folds it into a small `LatencyClass` label space for the
//! latency histogram.

/// Fine-grained query status as reported by Pi-hole v6.
///
/// `Unrecognized` is the default arm: classification must be total
/// over arbitrary input, so a status string this version does not
/// know about is carried through rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStatus {
    Unknown,
    Gravity,
    Forwarded,
    Cache,
    Regex,
    Denylist,
    ExternalBlockedIp,
    ExternalBlockedNull,
    ExternalBlockedNxra,
    GravityCname,
    RegexCname,
    DenylistCname,
    Retried,
    RetriedDnssec,
    InProgress,
    DbBusy,
    SpecialDomain,
    CacheStale,
    ExternalBlockedEde15,
    Unrecognized,
}

impl QueryStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "UNKNOWN" => Self::Unknown,
            "GRAVITY" => Self::Gravity,
            "FORWARDED" => Self::Forwarded,
            "CACHE" => Self::Cache,
            "REGEX" => Self::Regex,
            "DENYLIST" => Self::Denylist,
            "EXTERNAL_BLOCKED_IP" => Self::ExternalBlockedIp,
            "EXTERNAL_BLOCKED_NULL" => Self::ExternalBlockedNull,
            "EXTERNAL_BLOCKED_NXRA" => Self::ExternalBlockedNxra,
            "GRAVITY_CNAME" => Self::GravityCname,
            "REGEX_CNAME" => Self::RegexCname,
            "DENYLIST_CNAME" => Self::DenylistCname,
            "RETRIED" => Self::Retried,
            "RETRIED_DNSSEC" => Self::RetriedDnssec,
            "IN_PROGRESS" => Self::InProgress,
            "DBBUSY" => Self::DbBusy,
            "SPECIAL_DOMAIN" => Self::SpecialDomain,
            "CACHE_STALE" => Self::CacheStale,
            "EXTERNAL_BLOCKED_EDE15" => Self::ExternalBlockedEde15,
            _ => Self::Unrecognized,
        }
    }

    /// Coarse bucket used as the histogram label.
    ///
    /// Exhaustive on purpose: adding a status variant without deciding
    /// its class is a compile error.
    pub fn latency_class(self) -> LatencyClass {
        match self {
            Self::Cache | Self::CacheStale => LatencyClass::Cache,
            Self::Forwarded => LatencyClass::Forwarded,
            Self::Gravity
            | Self::Regex
            | Self::Denylist
            | Self::ExternalBlockedIp
            | Self::ExternalBlockedNull
            | Self::ExternalBlockedNxra
            | Self::GravityCname
            | Self::RegexCname
            | Self::DenylistCname
            | Self::SpecialDomain
            | Self::ExternalBlockedEde15 => LatencyClass::Blocked,
            Self::Retried | Self::RetriedDnssec => LatencyClass::Retried,
            Self::InProgress => LatencyClass::InProgress,
            Self::DbBusy | Self::Unknown => LatencyClass::Other,
            Self::Unrecognized => LatencyClass::Unknown,
        }
    }
}

/// Coarse latency bucket derived from a query status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LatencyClass {
    Cache,
    Forwarded,
    Blocked,
    Retried,
    InProgress,
    Other,
    Unknown,
}

impl LatencyClass {
    /// Pure, total classifier over arbitrary status strings.
    pub fn from_status(status: &str) -> Self {
        QueryStatus::parse(status).latency_class()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Forwarded => "forwarded",
            Self::Blocked => "blocked",
            Self::Retried => "retried",
            Self::InProgress => "in_progress",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }

    pub const ALL: [LatencyClass; 7] = [
        Self::Cache,
        Self::Forwarded,
        Self::Blocked,
        Self::Retried,
        Self::InProgress,
        Self::Other,
        Self::Unknown,
    ];
}
