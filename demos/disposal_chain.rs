//! Disposal chain demo
//!
//! Builds a three-level chain (config -> pool -> repository) where each level
//! depends on the one above it, resolves the repository and then disposes
//! the leaf. Teardown runs repository, pool, config: descendants first.
//!
//! Run with `RUST_LOG=chain_di=debug cargo run --example disposal_chain`.

use async_trait::async_trait;
use chain_di::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

struct Config {
    url: String,
}

impl Dispose for Config {
    fn dispose(&self) -> Result<(), BoxError> {
        println!("config released ({})", self.url);
        Ok(())
    }
}

struct Pool {
    config: Arc<Config>,
}

#[async_trait]
impl AsyncDispose for Pool {
    async fn dispose(&self) -> Result<(), BoxError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        println!("pool drained ({})", self.config.url);
        Ok(())
    }
}

impl Class for Pool {
    const INJECT: &'static [Token] = &[Token::new("config")];

    fn construct(args: Args) -> Result<Self, BoxError> {
        Ok(Pool { config: args.get(0)? })
    }

    fn disposer(self: Arc<Self>) -> Option<Disposer> {
        Some(Disposer::from_async(self))
    }
}

struct Repository {
    pool: Arc<Pool>,
    owner: Option<Target>,
}

#[async_trait]
impl AsyncDispose for Repository {
    async fn dispose(&self) -> Result<(), BoxError> {
        println!("repository closed");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Function::new("load_config", |_| {
        Ok(Config {
            url: "postgres://localhost/app".into(),
        })
    })
    .disposable();

    let repository = Function::new("open_repository", |args| {
        Ok(Repository {
            pool: args.get(0)?,
            owner: args.target(1)?,
        })
    })
    .with_inject([Token::new("pool"), TARGET_TOKEN])
    .async_disposable();

    let injector = create_injector()
        .provide_factory("config", config)?
        .provide_class::<Pool>("pool")?
        .provide_factory("repository", repository)?;

    println!("{:?}", injector);

    let repo = injector.get::<Repository>(&Token::new("repository"))?;
    println!(
        "repository ready on {} (requested by {:?})",
        repo.pool.config.url, repo.owner
    );

    injector.dispose().await?;

    match injector.resolve(&Token::new("repository")) {
        Err(err) => println!("after dispose: {}", err),
        Ok(_) => unreachable!("disposed injectors refuse to resolve"),
    }
    Ok(())
}
