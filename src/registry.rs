use std::fmt;

use crate::candidate::Candidate;
use crate::cases;
use crate::error::BenchError;

/// Benchmark body: builds a fresh container for the candidate and runs one
/// iteration of the case's workload on it.
pub type CaseBody = Box<dyn Fn(Candidate) -> Result<(), BenchError>>;

pub struct CaseDescriptor {
    name: String,
    body: CaseBody,
}

impl CaseDescriptor {
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(Candidate) -> Result<(), BenchError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, candidate: Candidate) -> Result<(), BenchError> {
        (self.body)(candidate)
    }
}

impl fmt::Debug for CaseDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Explicit table of named benchmark cases, populated once at start-up.
#[derive(Debug, Default)]
pub struct Registry {
    cases: Vec<CaseDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every case from [`cases::BUILTIN`].
    pub fn builtin() -> Self {
        cases::BUILTIN
            .iter()
            .fold(Self::new(), |registry, &(name, body)| {
                registry.with_case(name, body)
            })
    }

    pub fn with_case(
        mut self,
        name: impl Into<String>,
        body: impl Fn(Candidate) -> Result<(), BenchError> + 'static,
    ) -> Self {
        self.register(name, body);
        self
    }

    /// Add a case, replacing any case already registered under `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(Candidate) -> Result<(), BenchError> + 'static,
    ) {
        let descriptor = CaseDescriptor::new(name, body);
        match self
            .cases
            .iter_mut()
            .find(|case| case.name == descriptor.name)
        {
            Some(existing) => *existing = descriptor,
            None => self.cases.push(descriptor),
        }
    }

    pub fn lookup(&self, name: &str) -> Result<&CaseDescriptor, BenchError> {
        self.cases
            .iter()
            .find(|case| case.name == name)
            .ok_or_else(|| BenchError::UnknownCase(name.to_string()))
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(CaseDescriptor::name)
    }

    /// Names starting with `prefix`, sorted lexically.
    pub fn discover(&self, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .names()
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
