use crate::types::{Workout, WorkoutId};
use serde::{Deserialize, Serialize};

/// Ordered collection of workouts; insertion order is display order,
/// most recent last.
///
/// Serializes as a bare JSON array. Derived metrics and descriptions travel
/// inside each record, so a reloaded ledger renders without recomputing
/// anything.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    workouts: Vec<Workout>,
}

impl Ledger {
    pub fn append(&mut self, workout: Workout) {
        self.workouts.push(workout);
    }

    /// Linear scan; a miss is `None`, never a panic.
    pub fn find(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn find_mut(&mut self, id: WorkoutId) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id == id)
    }

    /// Wholesale replacement, used when adopting a persisted ledger at load.
    pub fn replace_all(&mut self, other: Self) {
        self.workouts = other.workouts;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Workout> {
        self.workouts.iter()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(blob: &str) -> serde_json::Result<Self> {
        serde_json::from_str(blob)
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Workout;
    type IntoIter = std::slice::Iter<'a, Workout>;

    fn into_iter(self) -> Self::IntoIter {
        self.workouts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coords;

    const COORDS: Coords = Coords {
        lat: 50.0614,
        lng: 19.9365,
    };

    fn sample_run() -> Workout {
        Workout::running(COORDS, 5.2, 24.0, 128.0)
    }

    fn sample_ride() -> Workout {
        Workout::cycling(COORDS, 27.0, 95.0, -120.0)
    }

    #[test]
    fn append_then_find_returns_the_record() {
        let mut ledger = Ledger::default();
        let run = sample_run();
        let id = run.id;
        ledger.append(run.clone());

        assert_eq!(ledger.find(id), Some(&run));
    }

    #[test]
    fn find_miss_is_none() {
        let mut ledger = Ledger::default();
        ledger.append(sample_run());

        let stale: WorkoutId = "1234567890".parse().unwrap();
        assert!(ledger.find(stale).is_none());
        assert!(ledger.find_mut(stale).is_none());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut ledger = Ledger::default();
        let a = sample_run();
        let b = sample_ride();
        let ids = [a.id, b.id];
        ledger.append(a);
        ledger.append(b);

        let seen: Vec<_> = ledger.iter().map(|w| w.id).collect();
        assert_eq!(seen, ids);
    }

    #[test]
    fn replace_all_discards_previous_contents() {
        let mut ledger = Ledger::default();
        ledger.append(sample_run());
        ledger.append(sample_run());

        let mut incoming = Ledger::default();
        let ride = sample_ride();
        let id = ride.id;
        incoming.append(ride);

        ledger.replace_all(incoming);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.find(id).is_some());
    }

    #[test]
    fn json_round_trip_preserves_every_display_field() {
        for n in [0usize, 1, 7] {
            let mut ledger = Ledger::default();
            for i in 0..n {
                if i % 2 == 0 {
                    ledger.append(sample_run());
                } else {
                    ledger.append(sample_ride());
                }
            }

            let blob = ledger.to_json().unwrap();
            let back = Ledger::from_json(&blob).unwrap();
            assert_eq!(back, ledger);
        }
    }

    #[test]
    fn empty_array_blob_is_an_empty_ledger() {
        let ledger = Ledger::from_json("[]").unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn garbage_blob_is_an_error_not_a_panic() {
        assert!(Ledger::from_json("not json").is_err());
        assert!(Ledger::from_json("{\"workouts\":3}").is_err());
    }

    #[test]
    fn blob_without_clicks_defaults_to_zero() {
        let mut ledger = Ledger::default();
        ledger.append(sample_run());
        let blob = ledger.to_json().unwrap().replace("\"clicks\":0,", "");

        let back = Ledger::from_json(&blob).unwrap();
        assert_eq!(back.iter().next().unwrap().clicks, 0);
    }
}
