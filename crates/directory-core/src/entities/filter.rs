//! Directory filters and the distinct-value menus that feed them

use std::collections::BTreeSet;

use super::member::Member;

/// Optional predicates for listing members.
///
/// Every supplied predicate must hold (logical AND); an omitted predicate
/// never excludes a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    /// Exact match on the admission year
    pub year_of_admission: Option<i32>,
    /// Exact match on the degree program label
    pub degree_program: Option<String>,
    /// Case-insensitive substring match on the city
    pub city: Option<String>,
    /// Case-insensitive substring match on the name
    pub search_term: Option<String>,
}

impl MemberFilter {
    /// Trim text predicates; blank ones behave like omitted ones
    #[must_use]
    pub fn normalized(self) -> Self {
        let keep = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Self {
            year_of_admission: self.year_of_admission,
            degree_program: keep(self.degree_program),
            city: keep(self.city),
            search_term: keep(self.search_term),
        }
    }

    /// True when no predicate is supplied
    pub fn is_empty(&self) -> bool {
        self.year_of_admission.is_none()
            && self.degree_program.is_none()
            && self.city.is_none()
            && self.search_term.is_none()
    }

    /// Evaluate the filter against a single member
    pub fn matches(&self, member: &Member) -> bool {
        if let Some(year) = self.year_of_admission {
            if member.year_of_admission != year {
                return false;
            }
        }
        if let Some(degree) = &self.degree_program {
            if &member.degree_program != degree {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !member.city_contains(city) {
                return false;
            }
        }
        if let Some(term) = &self.search_term {
            if !member.name_contains(term) {
                return false;
            }
        }
        true
    }
}

/// Distinct values across all current members, used to populate search menus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Admission years, newest first
    pub years: Vec<i32>,
    /// Degree program labels
    pub degrees: Vec<String>,
    /// Cities
    pub cities: Vec<String>,
}

impl FilterOptions {
    /// Collect distinct values from `(year, degree, city)` rows
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (i32, String, String)>,
    {
        let mut years = BTreeSet::new();
        let mut degrees = BTreeSet::new();
        let mut cities = BTreeSet::new();

        for (year, degree, city) in rows {
            years.insert(year);
            degrees.insert(degree);
            cities.insert(city);
        }

        Self {
            years: years.into_iter().rev().collect(),
            degrees: degrees.into_iter().collect(),
            cities: cities.into_iter().collect(),
        }
    }

    /// Collect distinct values from a set of members
    pub fn from_members<'a, I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a Member>,
    {
        Self::from_rows(members.into_iter().map(|m| {
            (
                m.year_of_admission,
                m.degree_program.clone(),
                m.city.clone(),
            )
        }))
    }

    /// True when the directory holds no members
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() && self.degrees.is_empty() && self.cities.is_empty()
    }
}
