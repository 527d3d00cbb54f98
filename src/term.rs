use crate::app::Frontend;
use crate::dlog;
use crate::types::{Coords, Detail, Workout};

/// Terminal stand-in for the map-and-list UI: entries and markers go to
/// stdout, map movements and warnings go through the log.
#[derive(Debug, Default)]
pub struct TermFrontend;

impl Frontend for TermFrontend {
    fn show_form(&mut self) {
        dlog!("form shown");
    }

    fn hide_form(&mut self) {
        dlog!("form cleared and hidden");
    }

    fn warn(&mut self, message: &str) {
        tracing::warn!("{message}");
    }

    fn render_entry(&mut self, workout: &Workout) {
        println!("{}", entry_line(workout));
    }

    fn init_map(&mut self, center: Coords, zoom: u8) {
        println!("map @ [{:.4}, {:.4}] zoom {zoom}", center.lat, center.lng);
    }

    fn render_marker(&mut self, workout: &Workout) {
        println!(
            "  📍 [{:.4}, {:.4}] {} {}",
            workout.coords.lat,
            workout.coords.lng,
            icon(workout),
            workout.description
        );
    }

    fn recenter(&mut self, target: Coords, zoom: u8, animate: bool) {
        println!(
            "map → [{:.4}, {:.4}] zoom {zoom}{}",
            target.lat,
            target.lng,
            if animate { " (animated)" } else { "" }
        );
    }
}

const fn icon(workout: &Workout) -> &'static str {
    match workout.detail {
        Detail::Running { .. } => "🏃",
        Detail::Cycling { .. } => "🚴",
    }
}

fn entry_line(workout: &Workout) -> String {
    let mut line = format!(
        "{}  {} {} | {} km | {} min",
        workout.id,
        icon(workout),
        workout.description,
        workout.distance_km,
        workout.duration_min
    );

    match workout.detail {
        Detail::Running {
            cadence_spm,
            pace_min_per_km,
        } => {
            line.push_str(&format!(
                " | {cadence_spm} spm | {pace_min_per_km:.1} min/km"
            ));
        }
        Detail::Cycling {
            elevation_gain_m,
            speed_kmh,
        } => {
            line.push_str(&format!(" | {elevation_gain_m} m | {speed_kmh:.1} km/h"));
        }
    }

    if workout.clicks > 0 {
        line.push_str(&format!(" | viewed {}x", workout.clicks));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    const COORDS: Coords = Coords {
        lat: 48.8566,
        lng: 2.3522,
    };

    #[test]
    fn running_entry_shows_cadence_and_pace() {
        let w = Workout::running(COORDS, 5.2, 24.0, 128.0);
        let line = entry_line(&w);

        assert!(line.contains("Running on"));
        assert!(line.contains("5.2 km"));
        assert!(line.contains("24 min"));
        assert!(line.contains("128 spm"));
        assert!(line.contains("4.6 min/km"));
        assert!(!line.contains("viewed"));
    }

    #[test]
    fn cycling_entry_shows_elevation_and_speed() {
        let mut w = Workout::cycling(COORDS, 5.2, 24.0, 128.0);
        w.click();
        let line = entry_line(&w);

        assert!(line.contains("Cycling on"));
        assert!(line.contains("128 m"));
        assert!(line.contains("13.0 km/h"));
        assert!(line.contains("viewed 1x"));
    }
}
