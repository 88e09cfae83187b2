//! Query sources: the query-translation tokens expressions are produced for

use std::fmt;

/// A source in a translated query. Group-by and additional-from sources
/// belong to the source they were derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuerySource {
    Main { name: String },
    Join { name: String },
    AdditionalFrom { name: String, owner: Box<QuerySource> },
    GroupBy { name: String, owner: Box<QuerySource> },
}

impl QuerySource {
    pub fn main(name: impl Into<String>) -> Self {
        QuerySource::Main { name: name.into() }
    }

    pub fn join(name: impl Into<String>) -> Self {
        QuerySource::Join { name: name.into() }
    }

    pub fn additional_from(name: impl Into<String>, owner: QuerySource) -> Self {
        QuerySource::AdditionalFrom {
            name: name.into(),
            owner: Box::new(owner),
        }
    }

    pub fn group_by(name: impl Into<String>, owner: QuerySource) -> Self {
        QuerySource::GroupBy {
            name: name.into(),
            owner: Box::new(owner),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            QuerySource::Main { name }
            | QuerySource::Join { name }
            | QuerySource::AdditionalFrom { name, .. }
            | QuerySource::GroupBy { name, .. } => name,
        }
    }

    /// The source this one stands for, following owners to the root
    pub fn canonical(&self) -> &QuerySource {
        let mut current = self;
        while let QuerySource::AdditionalFrom { owner, .. } | QuerySource::GroupBy { owner, .. } =
            current
        {
            current = owner;
        }
        current
    }
}

impl fmt::Display for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
