mod common;

use std::time::Duration;

use approx::assert_relative_eq;
use neo_orbit::{
    catalog,
    earth_model::EarthPhase,
    orbit_sampler::{sample_path, sample_path_with, write_path_csv},
    sbdb::parse_sbdb_response,
    time::parse_epoch,
    CancellationToken, NeoError, PropagationParams, Propagator, SampledPath,
};

use crate::common::{assert_vec_close, assert_within_apsides, epoch_2024};

#[test]
fn catalog_aliases_resolve_to_same_object() {
    for (full, number, name, parenthesised) in [
        ("99942 Apophis", "99942", "APOPHIS", "(99942) Apophis"),
        ("101955 Bennu", "101955", "bennu", "(101955)  Bennu"),
        ("433 Eros", "433", "Eros", "(433) eros"),
        ("1862 Apollo", "1862", "apollo", "(1862) APOLLO"),
        ("4179 Toutatis", "4179", " toutatis ", "(4179) Toutatis"),
    ] {
        let el = catalog::get(full).unwrap();
        assert_eq!(catalog::get(number), Some(el));
        assert_eq!(catalog::get(name), Some(el));
        assert_eq!(catalog::get(parenthesised), Some(el));
        assert_eq!(el.name(), Some(full));
        assert_eq!(el.epoch(), epoch_2024());
    }
    assert_eq!(catalog::get("2024 YR4"), None);
}

#[test]
fn catalog_paths_stay_within_apsides() {
    for designation in catalog::designations() {
        let el = catalog::get(designation).unwrap();
        let path = sample_path(el, 180, false);
        assert_eq!(path.len(), 180);
        assert!(path.converged, "{designation}");
        path.points.iter().for_each(|p| assert_within_apsides(el, p));
    }
}

#[test]
fn earth_centred_path_phasing_policies() {
    let el = catalog::get("bennu").unwrap();
    let helio = sample_path(el, 12, false);
    let by_index = sample_path(el, 12, true);
    let by_date = sample_path_with(
        el,
        12,
        true,
        &Propagator::new(
            PropagationParams::builder()
                .earth_phase(EarthPhase::CalendarDate)
                .build()
                .unwrap(),
        ),
        None,
    )
    .unwrap();

    // both policies start with Earth at (1 AU, 0, 0) on 1 January
    assert_vec_close(&by_index.points[0], &by_date.points[0], 1e-12);
    let earth = helio.points[0] - by_index.points[0];
    assert_relative_eq!(earth.norm(), neo_orbit::constants::AU, max_relative = 1e-12);
    assert!(helio.points.iter().zip(&by_index.points).all(|(h, e)| h != e));
}

#[test]
fn cancelled_sampling() {
    let token = CancellationToken::new();
    token.cancel();
    let el = catalog::get("eros").unwrap();
    assert_eq!(
        sample_path_with(el, 100, true, &Propagator::default(), Some(&token)),
        Err(NeoError::Cancelled { completed: 0 })
    );
    // an empty path never observes the token
    assert_eq!(
        sample_path_with(el, 0, true, &Propagator::default(), Some(&token)),
        Ok(SampledPath {
            points: vec![],
            converged: true
        })
    );
}

#[test]
fn cancellation_during_a_dense_sampling() {
    let el = catalog::get("eros").unwrap().clone();
    let num_points = 20_000_000;

    for delay_ms in [20, 100, 500] {
        let token = CancellationToken::new();
        let remote = token.clone();
        let path_el = el.clone();
        let handle = std::thread::spawn(move || {
            sample_path_with(&path_el, num_points, true, &Propagator::default(), Some(&remote))
        });
        std::thread::sleep(Duration::from_millis(delay_ms));
        token.cancel();

        match handle.join().unwrap() {
            Err(NeoError::Cancelled { completed }) if completed > 0 => {
                assert!(completed < num_points);
                return;
            }
            Err(NeoError::Cancelled { completed: 0 }) => continue,
            other => panic!("unexpected sampling outcome: {:?}", other.map(|p| p.len())),
        }
    }
    panic!("sampling never made progress before cancellation");
}

#[test]
fn path_csv_has_one_row_per_point() {
    let el = catalog::get("apollo").unwrap();
    let path = sample_path(el, 24, true);
    let mut buffer = Vec::new();
    write_path_csv(&path.points, &mut buffer).unwrap();

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), ["index", "x_km", "y_km", "z_km"]);
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 24);
    let x: f64 = rows[5][1].parse().unwrap();
    assert_eq!(x, path.points[5].x);
}

#[test]
fn sbdb_record_feeds_the_engine() {
    let body = r#"{
        "object": {"fullname": "  433 Eros (A898 PA)", "spkid": "2000433", "pha": false},
        "orbit": {"epoch": "2460400.5", "elements": [
            {"name": "a", "value": "1.458"}, {"name": "e", "value": ".2229"},
            {"name": "i", "value": "10.829"}, {"name": "om", "value": "304.3"},
            {"name": "w", "value": "178.9"}, {"name": "ma", "value": "320.0"}
        ]},
        "phys_par": [{"name": "diameter", "value": "16.84"}]
    }"#;
    let el = parse_sbdb_response(body).unwrap();
    assert_eq!(el.name(), Some("433 Eros (A898 PA)"));
    assert_relative_eq!(el.diameter_m().unwrap(), 16_840.0, max_relative = 1e-12);
    assert!(el.epoch() > parse_epoch("2024-03-01").unwrap());

    let path = sample_path(&el, 50, false);
    path.points.iter().for_each(|p| assert_within_apsides(&el, p));
}
