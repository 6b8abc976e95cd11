use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "product-cli")]
#[command(about = "Command-line client for the Product API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(short, long, env = "API_KEY", default_value = "12345")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product
    List,
    /// Show one product
    Get { id: String },
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: String,
        #[arg(long)]
        in_stock: bool,
    },
    /// Replace a product's fields; omitted fields are cleared
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        in_stock: Option<bool>,
    },
    /// Delete a product
    Delete { id: String },
    /// Filter, search and paginate
    Filter {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Product counts per category
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_str(&cli.key)?);

    let products = format!("{}/api/products", cli.url.trim_end_matches('/'));
    let request = |method: Method, url: String| -> RequestBuilder {
        client.request(method, url).headers(headers.clone())
    };

    let builder = match cli.command {
        Commands::List => request(Method::GET, products),
        Commands::Get { id } => request(Method::GET, format!("{products}/{id}")),
        Commands::Create {
            name,
            description,
            price,
            category,
            in_stock,
        } => request(Method::POST, products).json(&json!({
            "name": name,
            "description": description,
            "price": price,
            "category": category,
            "inStock": in_stock,
        })),
        Commands::Update {
            id,
            name,
            description,
            price,
            category,
            in_stock,
        } => {
            let mut body = serde_json::Map::new();
            insert_some(&mut body, "name", name);
            insert_some(&mut body, "description", description);
            insert_some(&mut body, "price", price);
            insert_some(&mut body, "category", category);
            insert_some(&mut body, "inStock", in_stock);
            request(Method::PUT, format!("{products}/{id}")).json(&body)
        }
        Commands::Delete { id } => request(Method::DELETE, format!("{products}/{id}")),
        Commands::Filter {
            category,
            search,
            page,
            limit,
        } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(c) = category {
                query.push(("category", c));
            }
            if let Some(s) = search {
                query.push(("search", s));
            }
            if let Some(p) = page {
                query.push(("page", p.to_string()));
            }
            if let Some(l) = limit {
                query.push(("limit", l.to_string()));
            }
            request(Method::GET, format!("{products}/filter")).query(&query)
        }
        Commands::Stats => request(Method::GET, format!("{products}/stats")),
    };

    print_response(builder.send().await?).await
}

fn insert_some<T: Into<Value>>(body: &mut serde_json::Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        body.insert(key.to_string(), v.into());
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
