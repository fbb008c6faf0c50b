// Customer directory
//
// In-memory, insert-ordered store for customers. Lookup order follows the
// load order of the backing file, so "first match wins" is deterministic.

use std::collections::HashSet;

use crate::customers::error::CustomerError;
use crate::customers::models::Customer;

/// Repository for customers, keyed by unique ID with name lookup.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Insert a customer, rejecting a duplicate ID.
    pub fn insert(&mut self, customer: Customer) -> Result<(), CustomerError> {
        if self.customers.iter().any(|c| c.id() == customer.id()) {
            return Err(CustomerError::DuplicateId(customer.id().to_string()));
        }
        self.customers.push(customer);
        Ok(())
    }

    /// Find a customer by exact ID or exact name, first match in insert
    /// order. A miss is a normal outcome, not an error.
    pub fn find(&self, token: &str) -> Option<&Customer> {
        let token = token.trim();
        self.customers
            .iter()
            .find(|c| c.name() == token || c.id() == token)
    }

    pub fn find_index(&self, token: &str) -> Option<usize> {
        let token = token.trim();
        self.customers
            .iter()
            .position(|c| c.name() == token || c.id() == token)
    }

    pub fn find_mut(&mut self, token: &str) -> Option<&mut Customer> {
        let token = token.trim();
        self.customers
            .iter_mut()
            .find(|c| c.name() == token || c.id() == token)
    }

    pub fn get(&self, index: usize) -> Option<&Customer> {
        self.customers.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Customer> {
        self.customers.get_mut(index)
    }

    /// Allocate a fresh ID with the given tier prefix.
    ///
    /// Scans the numeric suffix of every customer ID (both tiers share the
    /// suffix space) and picks the smallest unused positive integer.
    pub fn allocate_id(&self, prefix: char) -> String {
        let used: HashSet<u64> = self
            .customers
            .iter()
            .filter_map(|c| c.id().get(1..).and_then(|s| s.parse().ok()))
            .collect();

        let mut suffix = 1u64;
        while used.contains(&suffix) {
            suffix += 1;
        }
        format!("{}{}", prefix, suffix)
    }

    /// Register a brand-new Basic customer with a fresh ID and a zero
    /// reward balance. Returns the index of the new entry.
    pub(crate) fn register_basic(&mut self, name: &str) -> usize {
        let id = self.allocate_id('B');
        tracing::info!("Registering new Basic customer {} ({})", id, name);
        self.customers.push(Customer::basic(id, name, 0));
        self.customers.len() - 1
    }
}
