//
// lib.rs
// dicom-npy
//
// Exposes the crate's modules and re-exports the CLI entry point for both binary and library consumers.
//
// Thales Matheus Mendonça Santos - October 2026

// Public surface of the library: conversion pipeline pieces plus the CLI glue.
pub mod cli;
pub mod compression;
pub mod convert;
pub mod dump;
pub mod error;
pub mod metadata;
pub mod models;
pub mod npy;
pub mod pixels;
pub mod verify;

pub use cli::{run as run_cli, Cli, Commands};
pub use error::ConvertError;
