use strike_core::{OptionId, OptionRecord, OptionState};

/// The exclusive store of option records
///
/// Records live in an arena indexed by their sequential id, so lookups are
/// O(1) and external identifiers stay stable for the engine's lifetime.
/// Ids start at 0, strictly increase and are never reused. Only the
/// lifecycle controller mutates the ledger.
#[derive(Debug, Default)]
pub struct OptionsLedger {
    records: Vec<OptionRecord>,
}

impl OptionsLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// The id the next inserted record will receive
    pub fn next_id(&self) -> OptionId {
        self.records.len() as OptionId
    }

    /// Insert a record, assigning it the next sequential id
    ///
    /// # Returns
    /// The id the record was stored under
    pub fn insert(&mut self, mut record: OptionRecord) -> OptionId {
        let id = self.next_id();
        record.id = id;
        self.records.push(record);
        id
    }

    /// Get a record by id
    pub fn get(&self, id: OptionId) -> Option<&OptionRecord> {
        self.records.get(id as usize)
    }

    /// Get a mutable record by id
    pub fn get_mut(&mut self, id: OptionId) -> Option<&mut OptionRecord> {
        self.records.get_mut(id as usize)
    }

    /// State of the option with the given id
    ///
    /// Returns `Inactive` for an id that was never created.
    pub fn state_of(&self, id: OptionId) -> OptionState {
        self.get(id).map(|r| r.state).unwrap_or_default()
    }

    /// Number of records ever created
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no option has been created yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in id order
    pub fn iter(&self) -> impl Iterator<Item = &OptionRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strike_core::{AccountId, OptionType};

    fn record(holder: &str) -> OptionRecord {
        OptionRecord::new(
            0,
            AccountId::named(holder),
            50_000,
            1,
            OptionType::Put,
            2_000_000,
            0,
        )
    }

    #[test]
    fn test_ids_are_sequential_from_zero() {
        let mut ledger = OptionsLedger::new();
        assert_eq!(ledger.next_id(), 0);
        assert_eq!(ledger.insert(record("alice")), 0);
        assert_eq!(ledger.insert(record("bob")), 1);
        assert_eq!(ledger.insert(record("carol")), 2);
        assert_eq!(ledger.next_id(), 3);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_insert_overrides_record_id() {
        let mut ledger = OptionsLedger::new();
        let mut rec = record("alice");
        rec.id = 99;
        let id = ledger.insert(rec);
        assert_eq!(id, 0);
        assert_eq!(ledger.get(0).map(|r| r.id), Some(0));
    }

    #[test]
    fn test_get_unknown_id() {
        let ledger = OptionsLedger::new();
        assert!(ledger.get(0).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_state_of_unknown_id_is_inactive() {
        let ledger = OptionsLedger::new();
        assert_eq!(ledger.state_of(42), OptionState::Inactive);
    }

    #[test]
    fn test_state_mutation_through_get_mut() {
        let mut ledger = OptionsLedger::new();
        let id = ledger.insert(record("alice"));
        assert_eq!(ledger.state_of(id), OptionState::Active);

        if let Some(rec) = ledger.get_mut(id) {
            rec.state = OptionState::Exercised;
        }
        assert_eq!(ledger.state_of(id), OptionState::Exercised);
    }
}
