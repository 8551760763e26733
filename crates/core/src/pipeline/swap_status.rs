use std::fmt;

use serde::Serialize;

/// Outcome of a face swap request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    Success,
    /// An input is below the minimum size on at least one side.
    TooSmallInput,
    /// Too few landmarks were found in at least one image.
    FaceMissing,
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapStatus::Success => write!(f, "success"),
            SwapStatus::TooSmallInput => write!(f, "too small input"),
            SwapStatus::FaceMissing => write!(f, "face missing"),
        }
    }
}

/// Which of the two inputs a step is working on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    First,
    Second,
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSlot::First => write!(f, "first"),
            ImageSlot::Second => write!(f, "second"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapStage {
    Idle,
    Validating,
    Resizing,
    Extracting(ImageSlot),
    CheckingSufficiency,
    Swapping,
    /// Inputs normalized and landmarks ready; no swap was run.
    Prepared,
    Done(SwapStatus),
    /// The run ended with an error.
    Failed,
}

impl fmt::Display for SwapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapStage::Idle => write!(f, "idle"),
            SwapStage::Validating => write!(f, "validating"),
            SwapStage::Resizing => write!(f, "resizing"),
            SwapStage::Extracting(slot) => write!(f, "extracting ({slot} image)"),
            SwapStage::CheckingSufficiency => write!(f, "checking sufficiency"),
            SwapStage::Swapping => write!(f, "swapping"),
            SwapStage::Prepared => write!(f, "prepared"),
            SwapStage::Done(status) => write!(f, "done: {status}"),
            SwapStage::Failed => write!(f, "failed"),
        }
    }
}
