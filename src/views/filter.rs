// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record filters for the list views.
//!
//! A record is shown iff every active predicate matches. Filters are
//! re-evaluated over the full collection on each call.

use crate::models::{ClosedEnum, Group, Member, MemberRole, Record, UnknownValue};
use std::str::FromStr;

/// Sentinel accepted by every equality filter.
pub const ALL: &str = "all";

pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;
}

/// Filter that accepts every record (ministries, roles).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl<T> RecordFilter<T> for NoFilter {
    fn matches(&self, _record: &T) -> bool {
        true
    }
}

/// Records of `records` accepted by `filter`, in order.
pub fn apply<'a, T, F: RecordFilter<T>>(records: &'a [T], filter: &F) -> Vec<&'a T> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Case-insensitive substring match. Accents are significant.
pub fn matches_search(text: &str, term: &str) -> bool {
    term.is_empty() || text.to_lowercase().contains(&term.to_lowercase())
}

/// Equality filter over a closed enumeration, with `All` matching anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: ClosedEnum> Choice<T> {
    pub fn matches(&self, value: Option<T>) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => value == Some(*wanted),
        }
    }
}

impl<T: ClosedEnum + FromStr<Err = UnknownValue>> FromStr for Choice<T> {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            return Ok(Choice::All);
        }
        s.parse().map(Choice::Only)
    }
}

/// Baptism tri-state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaptismFilter {
    #[default]
    All,
    Yes,
    No,
}

impl BaptismFilter {
    pub fn matches(self, baptized: bool) -> bool {
        match self {
            BaptismFilter::All => true,
            BaptismFilter::Yes => baptized,
            BaptismFilter::No => !baptized,
        }
    }
}

impl FromStr for BaptismFilter {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(BaptismFilter::All),
            "yes" => Ok(BaptismFilter::Yes),
            "no" => Ok(BaptismFilter::No),
            _ => Err(UnknownValue {
                kind: "baptism filter",
                value: s.to_string(),
            }),
        }
    }
}

/// Filter selections of the member list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub search: String,
    pub group: Choice<Group>,
    pub role: Choice<MemberRole>,
    pub baptism: BaptismFilter,
}

impl RecordFilter<Member> for MemberFilter {
    fn matches(&self, member: &Member) -> bool {
        matches_search(&member.names, &self.search)
            && self.group.matches(member.minister)
            && self.role.matches(member.role)
            && self.baptism.matches(member.baptized)
    }
}
