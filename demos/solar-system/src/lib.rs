use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod ephemeris;
pub mod orbit;

use ephemeris::KeplerEphemeris;

orrery_web::export_orrery!(KeplerEphemeris, KeplerEphemeris::solar_system(), bodies::catalog(), "solar-system");

#[cfg(test)]
mod tests {
    use super::*;
    use orrery::{OrreryConfig, SimulationTime};
    use orrery_web::OrreryRunner;

    fn launch_day() -> SimulationTime {
        // 2024-03-20 00:00 UTC
        SimulationTime::from_unix_seconds(1_710_892_800.0)
    }

    fn runner() -> OrreryRunner<KeplerEphemeris> {
        let mut runner = OrreryRunner::new(
            bodies::catalog().unwrap(),
            KeplerEphemeris::solar_system(),
            OrreryConfig::default(),
            launch_day,
        )
        .unwrap();
        runner.resize(1280, 720);
        runner
    }

    #[test]
    fn whole_system_renders() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert_eq!(r.frame().instance_count(), 10);
        assert_eq!(r.frame().orbit_span_count(), 10);
        assert_eq!(r.frame().orbit_vertex_count(), 3600);
        assert_eq!(r.frame().trail_span_count(), 10);
    }

    #[test]
    fn a_day_per_second_by_default() {
        let mut r = runner();
        for _ in 0..20 {
            r.tick(0.05);
        }
        let elapsed = r.orrery().time() - launch_day();
        assert!((elapsed - 86_400.0).abs() < 1e-3, "elapsed = {elapsed}");
    }

    #[test]
    fn clicking_the_sun_selects_it() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        assert_eq!(r.click(640.0, 360.0), 0);
        r.tick(1.0 / 60.0);
        assert!(r.info_json().contains("\"bodyLabel\":\"Sun\""));
        assert!(r.info_json().contains("\"distanceAU\":0.0"));
    }

    #[test]
    fn time_label_is_utc_calendar() {
        let r = runner();
        assert_eq!(r.time_label(), "2024-03-20 00:00:00 UTC");
    }
}
