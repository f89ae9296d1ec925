//! Core business logic for Invoicer.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `calculation` - Line evaluation and invoice totals
//! - `invoice` - Invoice records, status rules and recalculation
//! - `payment` - Recording payments against invoices
//! - `numbering` - Sequential invoice numbers
//! - `portfolio` - Invoice listing and dashboard summary

pub mod calculation;
pub mod invoice;
pub mod numbering;
pub mod payment;
pub mod portfolio;
