// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod cig;
pub mod csf;
pub mod engine;
pub mod options;
pub mod pif;
pub mod traits;

pub use cig::{CellInformationGain, WeightedCellInformationGain};
pub use csf::CellSurpriseFactor;
pub use options::MetricOptions;
pub use pif::{PersonalInformationFactor, row_information_gains};
pub use traits::{CellValues, GlobalValue};
