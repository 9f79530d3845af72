//
// main.rs
// dicom-npy
//
// Binary entry point that hands off execution to the CLI layer.
//
// Thales Matheus Mendonça Santos - October 2026

use dicom_npy::cli;

fn main() -> anyhow::Result<()> {
    cli::run()
}
