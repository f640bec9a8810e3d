use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("invalid status `{code}`; valid statuses are: {}", .valid.join(", "))]
    InvalidStatus {
        code: String,
        valid: Vec<&'static str>,
    },
}

pub type StatsResult<T> = Result<T, StatsError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Acceptable,
    Exception,
    FirstOrder,
    Infeasible,
    MaxEval,
    MaxIter,
    MaxTime,
    NegPred,
    NotDesc,
    SmallResidual,
    SmallStep,
    Stalled,
    Unbounded,
    Unknown,
    User,
}

static REGISTRY: [(Status, &str, &str); 15] = [
    (
        Status::Acceptable,
        "acceptable",
        "solved to within acceptable tolerances",
    ),
    (Status::Exception, "exception", "unhandled exception"),
    (Status::FirstOrder, "first_order", "first-order stationary"),
    (Status::Infeasible, "infeasible", "problem may be infeasible"),
    (
        Status::MaxEval,
        "max_eval",
        "maximum number of function evaluations",
    ),
    (Status::MaxIter, "max_iter", "maximum iteration"),
    (Status::MaxTime, "max_time", "maximum elapsed time"),
    (Status::NegPred, "neg_pred", "negative predicted reduction"),
    (Status::NotDesc, "not_desc", "not a descent direction"),
    (Status::SmallResidual, "small_residual", "small residual"),
    (Status::SmallStep, "small_step", "step too small"),
    (Status::Stalled, "stalled", "stalled"),
    (
        Status::Unbounded,
        "unbounded",
        "objective function may be unbounded from below",
    ),
    (Status::Unknown, "unknown", "unknown"),
    (Status::User, "user", "user-requested stop"),
];

impl Status {
    pub const ALL: [Status; 15] = [
        Status::Acceptable,
        Status::Exception,
        Status::FirstOrder,
        Status::Infeasible,
        Status::MaxEval,
        Status::MaxIter,
        Status::MaxTime,
        Status::NegPred,
        Status::NotDesc,
        Status::SmallResidual,
        Status::SmallStep,
        Status::Stalled,
        Status::Unbounded,
        Status::Unknown,
        Status::User,
    ];

    fn entry(self) -> &'static (Status, &'static str, &'static str) {
        // REGISTRY is declared in the same order as the enum variants.
        &REGISTRY[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.entry().1
    }

    pub fn description(self) -> &'static str {
        self.entry().2
    }

    pub fn is_success(self) -> bool {
        matches!(self, Status::FirstOrder | Status::Acceptable)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Status {
    type Err = StatsError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|(_, name, _)| *name == code)
            .map(|(status, _, _)| *status)
            .ok_or_else(|| StatsError::InvalidStatus {
                code: code.to_owned(),
                valid: valid_codes(),
            })
    }
}

/// Conversion into a registered [`Status`].
pub trait IntoStatus {
    fn into_status(self) -> StatsResult<Status>;
}

impl IntoStatus for Status {
    fn into_status(self) -> StatsResult<Status> {
        Ok(self)
    }
}

impl IntoStatus for &str {
    fn into_status(self) -> StatsResult<Status> {
        self.parse()
    }
}

impl IntoStatus for String {
    fn into_status(self) -> StatsResult<Status> {
        self.as_str().parse()
    }
}

impl IntoStatus for &String {
    fn into_status(self) -> StatsResult<Status> {
        self.as_str().parse()
    }
}

/// `(code, description)` pairs of the registry, ordered by code.
pub fn list_statuses() -> impl ExactSizeIterator<Item = (&'static str, &'static str)> {
    REGISTRY.iter().map(|(_, code, description)| (*code, *description))
}

pub fn is_valid(code: &str) -> bool {
    REGISTRY.iter().any(|(_, name, _)| *name == code)
}

fn valid_codes() -> Vec<&'static str> {
    list_statuses().map(|(code, _)| code).collect()
}

pub fn format_statuses() -> String {
    let width = list_statuses()
        .map(|(code, _)| code.len())
        .max()
        .unwrap_or(0);
    itertools::join(
        list_statuses().map(|(code, description)| format!("{code:<width$}  {description}")),
        "\n",
    )
}
