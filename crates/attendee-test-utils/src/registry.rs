//! In-memory hints registry

use async_trait::async_trait;
use attendee_model::{HrId, Location};
use attendee_plugin::{Card, CollaboratorError, CollaboratorKind, HintsRegistry};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// One call received by [`InMemoryRegistry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    RemoveAtLocation { location: Location, source: String },
    RemoveInRegion { region: Location, source: String },
    AddHints { hr_id: HrId, source: String, count: usize },
    UpdateLocation { hr_id: HrId, location: Location },
}

/// Registry keeping cards per source, keyed by their scan-time location
///
/// Location remapping shifts both bounds by a fixed offset, standing in for
/// text inserted before the region since the scan.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    hints: DashMap<String, Vec<Card>>,
    calls: Mutex<Vec<RegistryCall>>,
    offset: AtomicUsize,
    fail_add: AtomicBool,
    fail_remove: AtomicBool,
}

impl InMemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift applied by `update_location_to_current_index`
    pub fn set_offset(&self, offset: usize) {
        self.offset.store(offset, Ordering::SeqCst);
    }

    pub fn fail_add_hints(&self, fail: bool) {
        self.fail_add.store(fail, Ordering::SeqCst);
    }

    pub fn fail_removals(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    /// Number of hints registered for `source`
    #[must_use]
    pub fn hint_count(&self, source: &str) -> usize {
        self.hints.get(source).map_or(0, |cards| cards.len())
    }

    /// Scan-time locations of the hints registered for `source`
    #[must_use]
    pub fn locations(&self, source: &str) -> Vec<Location> {
        self.hints
            .get(source)
            .map(|cards| cards.iter().map(Card::location).collect())
            .unwrap_or_default()
    }

    /// Hand the registered cards of `source` to the caller
    #[must_use]
    pub fn take_cards(&self, source: &str) -> Vec<Card> {
        self.hints
            .remove(source)
            .map(|(_, cards)| cards)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: RegistryCall) {
        self.calls.lock().push(call);
    }

    fn check_removal(&self, operation: &str) -> Result<(), CollaboratorError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(CollaboratorError::failed(
                CollaboratorKind::Registry,
                operation,
                "injected failure",
            ));
        }
        Ok(())
    }

    fn retain(&self, source: &str, keep: impl Fn(&Card) -> bool) {
        if let Some(mut cards) = self.hints.get_mut(source) {
            cards.retain(|card| keep(card));
        }
    }
}

#[async_trait]
impl HintsRegistry for InMemoryRegistry {
    async fn remove_hints_at_location(
        &self,
        location: Location,
        _hr_id: &HrId,
        source: &str,
    ) -> Result<(), CollaboratorError> {
        self.record(RegistryCall::RemoveAtLocation {
            location,
            source: source.to_string(),
        });
        self.check_removal("remove hints at location")?;
        self.retain(source, |card| card.location() != location);
        Ok(())
    }

    async fn remove_hints_in_region(
        &self,
        region: Location,
        _hr_id: &HrId,
        source: &str,
    ) -> Result<(), CollaboratorError> {
        self.record(RegistryCall::RemoveInRegion {
            region,
            source: source.to_string(),
        });
        self.check_removal("remove hints in region")?;
        self.retain(source, |card| !region.contains(&card.location()));
        Ok(())
    }

    async fn add_hints(
        &self,
        hr_id: &HrId,
        source: &str,
        cards: Vec<Card>,
    ) -> Result<(), CollaboratorError> {
        self.record(RegistryCall::AddHints {
            hr_id: hr_id.clone(),
            source: source.to_string(),
            count: cards.len(),
        });
        if self.fail_add.load(Ordering::SeqCst) {
            return Err(CollaboratorError::failed(
                CollaboratorKind::Registry,
                "add hints",
                "injected failure",
            ));
        }
        self.hints.entry(source.to_string()).or_default().extend(cards);
        Ok(())
    }

    async fn update_location_to_current_index(
        &self,
        hr_id: &HrId,
        location: Location,
    ) -> Result<Location, CollaboratorError> {
        self.record(RegistryCall::UpdateLocation {
            hr_id: hr_id.clone(),
            location,
        });
        let offset = self.offset.load(Ordering::SeqCst);
        Ok(Location::new(location.start + offset, location.end + offset))
    }
}
