use serde::{Deserialize, Serialize};

/// Kind of standing instruction residents can leave at the front desk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontDeskInstructionType {
    pub id: String,
    pub name: String,
}

/// An active front desk instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrontDeskInstruction {
    pub id: String,
    pub instruction_type_id: String,
    pub notes: String,
}
