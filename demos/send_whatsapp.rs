use std::io;

use bulksms_iraq::BulkSmsClient;

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
    let message = std::env::var("BULKSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the bulksms-iraq example.".to_owned());

    let client = BulkSmsClient::new(api_key);
    let response = client
        .send_whatsapp_english(recipient, sender_id, message)
        .await?;

    println!("{:?}", response.as_map());

    Ok(())
}
