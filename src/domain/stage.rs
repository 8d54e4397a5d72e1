use std::fmt;

/// A production stage. The pipeline is a strict linear chain, so each stage
/// has at most one neighbour in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Cutting,
    Upholstery,
    Paint,
    Package,
    Shipment,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 5] = [
        Stage::Cutting,
        Stage::Upholstery,
        Stage::Paint,
        Stage::Package,
        Stage::Shipment,
    ];

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Cutting => Some(Stage::Upholstery),
            Stage::Upholstery => Some(Stage::Paint),
            Stage::Paint => Some(Stage::Package),
            Stage::Package => Some(Stage::Shipment),
            Stage::Shipment => None,
        }
    }

    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Cutting => None,
            Stage::Upholstery => Some(Stage::Cutting),
            Stage::Paint => Some(Stage::Upholstery),
            Stage::Package => Some(Stage::Paint),
            Stage::Shipment => Some(Stage::Package),
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Cutting => "cutting",
            Stage::Upholstery => "upholstery",
            Stage::Paint => "paint",
            Stage::Package => "package",
            Stage::Shipment => "shipment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
