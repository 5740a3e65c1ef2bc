use std::io;

use bulksms_iraq::{BulkSmsClient, Language, MessageType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("BULKSMS_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BULKSMS_API_KEY environment variable is required",
        )
    })?;
    let recipient = std::env::var("BULKSMS_RECIPIENT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "BULKSMS_RECIPIENT environment variable is required",
        )
    })?;
    let sender_id = std::env::var("BULKSMS_SENDER_ID").unwrap_or_else(|_| "SenderID".to_owned());

    let client = BulkSmsClient::new(api_key);
    let sent = client
        .send_auto_otp(
            recipient.clone(),
            sender_id,
            MessageType::WhatsApp,
            Language::English,
        )
        .await?;
    println!("sendotp: {:?}", sent.as_map());

    let id = sent
        .get("data")
        .and_then(|data| data.get("id"))
        .and_then(|id| id.as_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "response has no OTP id"))?
        .to_owned();

    println!("enter the code you received:");
    let mut code = String::new();
    io::stdin().read_line(&mut code)?;

    let verified = client.verify_otp(recipient, code.trim(), id).await?;
    println!("verifyotp: {:?}", verified.as_map());

    Ok(())
}
