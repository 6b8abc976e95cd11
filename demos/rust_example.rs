use sdk_rust::{ProductClient, ProductInput};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = ProductClient::new("http://localhost:3000", "12345");

    println!("{}", client.welcome().await?);

    let created = client
        .create(&ProductInput::complete(
            "Desk Lamp",
            "LED lamp with dimmer",
            35,
            "home",
            true,
        ))
        .await?;
    println!("Created product {}", created.id);

    let page = client.filter(&[("search", "lamp"), ("limit", "5")]).await?;
    println!("{} matching product(s)", page.total);

    for (category, count) in client.stats().await? {
        println!("{category}: {count}");
    }

    client.delete(&created.id).await?;
    Ok(())
}
