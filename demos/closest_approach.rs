use std::env;
use std::fs::File;

use neo_orbit::catalog;
use neo_orbit::close_approach::closest_approach_with;
use neo_orbit::neo_errors::NeoError;
use neo_orbit::orbit_sampler::{sample_path_with, write_path_csv};
use neo_orbit::propagator::to_cartesian_at_epoch;
use neo_orbit::{OrbitalElements, Propagator};

/// Scan `days_ahead` days for the closest approach of `elements` and export
/// one Earth-centred orbital period as CSV.
///
/// Arguments
/// -----------------
/// * `elements`: orbit to analyse.
/// * `days_ahead`: scan window in days.
/// * `csv_path`: optional destination of the sampled path.
///
/// See also
/// ------------
/// * [`closest_approach_with`] – day-resolution scan.
/// * [`sample_path_with`] – path sampling used for the CSV export.
fn run(
    elements: &OrbitalElements,
    days_ahead: u32,
    csv_path: Option<&str>,
) -> Result<(), NeoError> {
    let propagator = Propagator::default();

    println!("{elements}\n");
    println!("State at epoch:\n{}\n", to_cartesian_at_epoch(elements).state);

    let ca = closest_approach_with(elements, days_ahead, &propagator, None)?;
    println!("{ca}");

    if let Some(path) = csv_path {
        let sampled = sample_path_with(elements, 360, true, &propagator, None)?;
        write_path_csv(&sampled.points, File::create(path)?)?;
        println!("Earth-centred path ({} points) written to {path}", sampled.len());
        if !sampled.converged {
            println!("warning: some samples did not converge");
        }
    }
    Ok(())
}

/// Usage:
///   closest_approach <DESIGNATION> [DAYS] [PATH.csv]
/// Example:
///   cargo run --example closest_approach -- "99942 Apophis" 3650 apophis.csv
fn main() {
    let args: Vec<String> = env::args().collect();
    let designation = args.get(1).map(String::as_str).unwrap_or("99942 Apophis");
    let days_ahead = args
        .get(2)
        .and_then(|d| d.parse::<u32>().ok())
        .unwrap_or(3_650);
    let csv_path = args.get(3).map(String::as_str);

    let Some(elements) = catalog::get(designation) else {
        eprintln!(
            "'{designation}' is not in the local catalog; known objects: {}",
            catalog::designations().join(", ")
        );
        std::process::exit(1);
    };

    if let Err(err) = run(elements, days_ahead, csv_path) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
