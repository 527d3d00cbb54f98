use crate::dlog;
use crate::ledger::Ledger;
use crate::store::Store;
use crate::types::{Coords, Workout, WorkoutId};
use anyhow::Result;

/// Zoom the map opens at once a position arrives.
pub const MAP_ZOOM_DEFAULT: u8 = 13;
/// Zoom when centering on a selected workout.
pub const MAP_ZOOM_FOCUS: u8 = 15;

const INVALID_INPUT: &str = "Inputs have to be positive numbers!";
const UNKNOWN_KIND: &str = "Unknown workout type";
const POSITION_FAILED: &str = "Could not get your position";

/// Everything the controller asks of the outside world: the map, the list
/// view, the form, and user-facing warnings.
pub trait Frontend {
    /// Reveal the form and focus the distance field.
    fn show_form(&mut self);
    /// Clear the form fields and hide it again.
    fn hide_form(&mut self);
    /// Blocking user-facing notification.
    fn warn(&mut self, message: &str);
    fn render_entry(&mut self, workout: &Workout);
    fn init_map(&mut self, center: Coords, zoom: u8);
    fn render_marker(&mut self, workout: &Workout);
    fn recenter(&mut self, target: Coords, zoom: u8, animate: bool);
}

/// Raw form values as the user typed them; coerced to numbers at submit.
#[derive(Debug, Default, Clone)]
pub struct FormInput {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

#[derive(Debug, Clone, Copy)]
enum FormState {
    Hidden,
    Shown { pending: Coords },
}

/// The one controller instance; owns the ledger, the store, and the
/// frontend for the life of the session.
pub struct App<F: Frontend> {
    ledger: Ledger,
    store: Store,
    frontend: F,
    form: FormState,
    map_ready: bool,
}

impl<F: Frontend> App<F> {
    /// Adopts any persisted ledger and renders its entries into the list
    /// immediately. Map markers wait for `position_acquired`; if the
    /// position never arrives, the records stay list-only.
    pub fn start(store: Store, frontend: F) -> Self {
        let mut app = Self {
            ledger: Ledger::default(),
            store,
            frontend,
            form: FormState::Hidden,
            map_ready: false,
        };

        app.ledger.replace_all(app.store.load());
        dlog!("loaded {} stored workouts", app.ledger.len());

        for workout in app.ledger.iter() {
            app.frontend.render_entry(workout);
        }
        app
    }

    pub fn position_acquired(&mut self, here: Coords) {
        if self.map_ready {
            dlog!("position delivered twice, ignoring");
            return;
        }

        self.frontend.init_map(here, MAP_ZOOM_DEFAULT);
        self.map_ready = true;

        for workout in self.ledger.iter() {
            self.frontend.render_marker(workout);
        }
    }

    pub fn position_failed(&mut self) {
        self.frontend.warn(POSITION_FAILED);
    }

    /// A click on the map surface: remember where, open the form.
    pub fn map_clicked(&mut self, at: Coords) {
        self.form = FormState::Shown { pending: at };
        self.frontend.show_form();
    }

    /// Form submit. Only acts while the form is shown; validation failures
    /// warn the user and leave every bit of state untouched.
    pub fn submit(&mut self, input: &FormInput) -> Result<()> {
        let FormState::Shown { pending } = self.form else {
            dlog!("submit with no pending map click, ignoring");
            return Ok(());
        };

        let distance = coerce(&input.distance);
        let duration = coerce(&input.duration);

        let workout = match input.kind.as_str() {
            "running" => {
                let cadence = coerce(&input.cadence);
                if !all_finite(&[distance, duration, cadence])
                    || !all_positive(&[distance, duration, cadence])
                {
                    self.frontend.warn(INVALID_INPUT);
                    return Ok(());
                }
                Workout::running(pending, distance, duration, cadence)
            }
            "cycling" => {
                // Elevation only has to be a number: flat and downhill
                // rides are real rides.
                let elevation = coerce(&input.elevation);
                if !all_finite(&[distance, duration, elevation])
                    || !all_positive(&[distance, duration])
                {
                    self.frontend.warn(INVALID_INPUT);
                    return Ok(());
                }
                Workout::cycling(pending, distance, duration, elevation)
            }
            other => {
                dlog!("unknown workout type {other:?}");
                self.frontend.warn(UNKNOWN_KIND);
                return Ok(());
            }
        };

        if self.map_ready {
            self.frontend.render_marker(&workout);
        }
        self.frontend.render_entry(&workout);

        self.ledger.append(workout);
        self.store.save(&self.ledger)?;

        self.form = FormState::Hidden;
        self.frontend.hide_form();
        Ok(())
    }

    /// A click on a list entry: center the map there and count the visit.
    /// A stale or unknown id is a no-op.
    pub fn select(&mut self, id: WorkoutId) -> Result<()> {
        let Some(workout) = self.ledger.find_mut(id) else {
            dlog!("select missed id={id}");
            return Ok(());
        };

        workout.click();
        let target = workout.coords;

        if self.map_ready {
            self.frontend.recenter(target, MAP_ZOOM_FOCUS, true);
        }
        self.store.save(&self.ledger)
    }

    /// Clears persisted state; the next start comes up empty.
    pub fn reset(self) -> Result<()> {
        self.store.wipe()
    }

    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub const fn frontend(&self) -> &F {
        &self.frontend
    }

    pub const fn map_ready(&self) -> bool {
        self.map_ready
    }
}

/// DOM-style numeric coercion: blank is zero, anything unparsable is NaN
/// and fails the finiteness gate downstream.
fn coerce(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        0.0
    } else {
        raw.parse().unwrap_or(f64::NAN)
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|v| *v > 0.0)
}
