use crate::types::Coords;
use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt};

#[macro_export]
macro_rules! dlog {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

/// Initialize colorful logging.
///
/// Default level is INFO.
/// - `-v` => DEBUG
/// - `-vv` => TRACE
/// - `-q` => WARN
/// - `-qq` => ERROR
///
/// `RUST_LOG` overrides everything (e.g. `RUST_LOG=trace`).
pub fn init_logging(verbose: u8, quiet: u8) {
    let net = verbose as i8 - quiet as i8;
    let level = match net {
        i8::MIN..=-2 => "error",
        -1 => "warn",
        0 => "info",
        1 => "debug",
        2..=i8::MAX => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,paceline={level}")));

    let show_src = matches!(level, "debug" | "trace");

    fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .init();
}

/// Parses the `--at LAT,LNG` position argument.
pub fn parse_latlng(raw: &str) -> Result<Coords> {
    let (lat, lng) = raw
        .split_once(',')
        .with_context(|| format!("position must be LAT,LNG, got {raw:?}"))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("bad latitude in {raw:?}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .with_context(|| format!("bad longitude in {raw:?}"))?;

    if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
        bail!("position out of range: {raw}");
    }

    Ok(Coords { lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_pair() {
        let c = parse_latlng("52.2297, 21.0122").unwrap();
        assert!((c.lat - 52.2297).abs() < 1e-12);
        assert!((c.lng - 21.0122).abs() < 1e-12);
    }

    #[test]
    fn parses_negative_coordinates() {
        let c = parse_latlng("-33.87,151.21").unwrap();
        assert!(c.lat < 0.0);
    }

    #[test]
    fn rejects_malformed_and_out_of_range_input() {
        assert!(parse_latlng("52.2297").is_err());
        assert!(parse_latlng("north,east").is_err());
        assert!(parse_latlng("91,0").is_err());
        assert!(parse_latlng("0,181").is_err());
        assert!(parse_latlng("NaN,0").is_err());
    }
}
