pub mod change_hold_type_cmd;
pub mod confirm_hold_cmd;
pub mod create_hold_cmd;
pub mod delete_hold_cmd;
pub mod reinstatement_cmd;
pub mod release_hold_cmd;
pub mod reservation_to_hold_cmd;
pub mod sweep_holds_cmd;
pub mod update_hold_cmd;
