//! HAL browsing example
//!
//! Fetches a root resource, prints its properties and links, then follows
//! the first link relation given on the command line.
//!
//! Run with: RUST_LOG=hal_client=debug cargo run --example browse -- http://propilex.herokuapp.com documents

use hal_client::{HalClient, HalResource, RequestOptions, Variables};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let root_url = args
        .next()
        .unwrap_or_else(|| "http://propilex.herokuapp.com".to_string());
    let rel = args.next();

    println!("HAL Browse Example");
    println!("==================\n");

    let client = HalClient::new(&root_url)?;
    let root = client.root(RequestOptions::new()).await?;
    print_resource(&root_url, &root);

    if let Some(rel) = rel {
        match root.first_link(&rel)? {
            Some(link) => {
                let target = link.get(&Variables::new(), RequestOptions::new()).await?;
                print_resource(link.href(), &target);
            }
            None => println!("Relation \"{}\" has no links", rel),
        }
    }

    Ok(())
}

fn print_resource(location: &str, resource: &HalResource) {
    println!("{}", location);

    for (name, value) in resource.properties() {
        println!("  {} = {}", name, value);
    }
    for (rel, links) in resource.links() {
        for link in links {
            println!("  link {} -> {}", rel, link.href());
        }
    }
    for (rel, resources) in resource.resources() {
        println!("  embedded {} x{}", rel, resources.len());
    }
    println!();
}
