//! # Mock Framework
//!
//! Utilities for testing pool collaborators in isolation.
//!
//! [`MockPool`] implements [`BurrowPool`] without spawning any actor. Status
//! requests return a fixed list of burrows; rentout results are scripted with
//! the expectation builder and consumed in order.

use crate::clients::BurrowPool;
use crate::framework::{PoolError, RentError};
use crate::model::Burrow;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected call on the mock pool and the result it returns.
enum Expectation {
    Rentout { response: Result<Burrow, RentError> },
    Admit { response: Result<String, PoolError> },
}

/// A scripted pool with expectation tracking.
///
/// # Example
/// ```ignore
/// let mock = MockPool::with_burrows(vec![Burrow::new("Burrow 1", 2.5, 1.2, 10)]);
/// mock.expect_rentout().return_err(RentError::NoBurrowAvailable);
///
/// let pool: Arc<dyn BurrowPool> = Arc::new(mock.clone());
/// // Use pool in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
#[derive(Clone, Default)]
pub struct MockPool {
    burrows: Arc<Mutex<Vec<Burrow>>>,
    admitted: Arc<Mutex<Vec<Burrow>>>,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl MockPool {
    /// Creates a mock pool with no burrows and no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock pool whose status is `burrows`.
    pub fn with_burrows(burrows: Vec<Burrow>) -> Self {
        let mock = Self::new();
        *mock.burrows.lock().unwrap() = burrows;
        mock
    }

    /// Expects a `rentout` call.
    pub fn expect_rentout(&self) -> RentoutExpectationBuilder {
        RentoutExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `admit` call. Unscripted admissions succeed under the
    /// burrow's own name.
    pub fn expect_admit(&self) -> AdmitExpectationBuilder {
        AdmitExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Burrows passed to `admit` so far, in call order.
    pub fn admitted(&self) -> Vec<Burrow> {
        self.admitted.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn pop_rentout(&self) -> Result<Burrow, RentError> {
        let mut exps = self.expectations.lock().unwrap();
        match exps.pop_front() {
            Some(Expectation::Rentout { response }) => response,
            Some(_) => panic!("Unexpected rentout: another call was expected first"),
            None => panic!("Unexpected rentout: no expectation left"),
        }
    }

    fn pop_admit(&self, burrow: &Burrow) -> Result<String, PoolError> {
        let mut exps = self.expectations.lock().unwrap();
        if !matches!(exps.front(), Some(Expectation::Admit { .. })) {
            return Ok(burrow.name.clone());
        }
        match exps.pop_front() {
            Some(Expectation::Admit { response }) => response,
            _ => panic!("Unexpected admit"),
        }
    }
}

#[async_trait]
impl BurrowPool for MockPool {
    async fn admit(&self, burrow: Burrow) -> Result<String, PoolError> {
        let response = self.pop_admit(&burrow);
        if response.is_ok() {
            self.admitted.lock().unwrap().push(burrow);
        }
        response
    }

    async fn current_status(&self) -> Vec<Burrow> {
        self.burrows.lock().unwrap().clone()
    }

    async fn rentout(&self, _deadline: Duration) -> Result<Burrow, RentError> {
        self.pop_rentout()
    }
}

/// Builder for `rentout` expectations.
pub struct RentoutExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl RentoutExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, burrow: Burrow) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Rentout {
            response: Ok(burrow),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RentError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Rentout {
            response: Err(error),
        });
    }
}

/// Builder for `admit` expectations.
pub struct AdmitExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl AdmitExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, name: impl Into<String>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Admit {
            response: Ok(name.into()),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: PoolError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Admit {
            response: Err(error),
        });
    }
}
