use servicetitan_client::{Config, PathParts, RequestOptions, ServiceTitanClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional: enable basic logging for the example
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // Credentials come from SERVICETITAN_* environment variables
    let cfg = Config::from_env()?;
    let client = ServiceTitanClient::new(cfg)?;

    let customers_url = client.build_url(&PathParts::new("crm", "customers"))?;
    let options = RequestOptions::new().query("pageSize", 50);
    let first = client.get(&customers_url, &options).await?;
    println!("first page has more: {}", first.has_more());

    let customers = client
        .get_all(&customers_url, &options)
        .await?;
    println!("fetched {} customers", customers.len());

    let today = jiff::Zoned::now().date();
    println!(
        "today starts at {} UTC",
        client.zone().start_of_day_utc_string(today)?
    );
    Ok(())
}
