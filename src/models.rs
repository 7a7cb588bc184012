use std::path::PathBuf;

use crate::errors::FetchError;

/// File names enumerated by the remote listing, in listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    names: Vec<String>,
}

impl Listing {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = std::collections::HashSet::new();
        let names = names
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl IntoIterator for Listing {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

/// Outcome of one successful fetch task.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub name: String,
    pub path: PathBuf,
    pub lines: usize,
    pub bytes: u64,
}

#[derive(Debug)]
pub struct TaskFailure {
    pub name: String,
    pub error: FetchError,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub listed: usize,
    pub fetched: Vec<FetchReport>,
    pub failures: Vec<TaskFailure>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.fetched.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_drops_duplicate_names() {
        let listing = Listing::new(vec![
            "fib.rinha".to_string(),
            "sum.rinha".to_string(),
            "fib.rinha".to_string(),
        ]);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.names(), ["fib.rinha", "sum.rinha"]);
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            listed: 2,
            fetched: vec![FetchReport {
                name: "a".to_string(),
                path: PathBuf::from("files/a"),
                lines: 1,
                bytes: 2,
            }],
            failures: vec![TaskFailure {
                name: "b".to_string(),
                error: FetchError::FetchStatus {
                    name: "b".to_string(),
                    status: 404,
                },
            }],
        };
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
    }
}
