use log::{error, info};
use polygon_shared::error::ImportErrors;
use polygon_shared::messages::Message;
use std::io::BufWriter;

pub fn show_error_message(error: ImportErrors) {
    let (error_code, message) = error.get_code_and_message();
    error!("\n");
    error!("**************************************************");
    error!("\tPolygon Import Ran into an error");
    error!("\tError Code: {:#X}", error_code);
    error!("\t{}", message);
    error!("**************************************************");
    error!("\n\n\n");
}

pub fn send_error_message(error: ImportErrors) {
    let message = Message::Error(error);
    bincode::serialize_into(BufWriter::new(std::io::stdout()), &message)
        .expect("Write Limit should not be hit");
}

pub fn display_state_update(state_message: &str, send_message: bool) {
    if send_message {
        let message = Message::StateUpdate(state_message.to_string());
        bincode::serialize_into(BufWriter::new(std::io::stdout()), &message)
            .expect("Write Limit should not be hit");
    } else {
        info!("{}", state_message);
    }
}
