//! # CLI Layer
//!
//! One possible client of the storefront library. This is the only place that
//! touches the terminal, reads process arguments, installs the tracing
//! subscriber, or decides where the data directory lives.
//!
//! ## Structure
//!
//! - `run()`: parse, build the context, dispatch (called by `main.rs`)
//! - `init_context()`: data dir, config, and the `StorefrontApi` over files
//! - `handle_*()`: one per command; call the API, then a `print_*` function

use super::print::{
    print_config_entry, print_messages, print_order, print_product, print_products,
};
use super::setup::{Cli, Commands, ListArgs, ProductArgs};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use storefront::api::{CmdMessage, StorefrontApi};
use storefront::commands::violation_messages;
use storefront::config::{StorefrontConfig, CONFIG_KEYS};
use storefront::error::{Result, StoreError};
use storefront::model::{Category, ProductDraft};
use storefront::query::{ProductFilter, Query};
use storefront::schema::ProductForm;
use storefront::session::SessionEvent;
use storefront::store::fs_backend::FsBackend;
use storefront::upload::CloudinaryHost;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: StorefrontApi<FsBackend>,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        None => handle_list(&ctx, ListArgs::default()),
        Some(Commands::List(args)) => handle_list(&ctx, args),
        Some(Commands::Category { category }) => handle_category(&ctx, category),
        Some(Commands::New) => handle_new(&ctx),
        Some(Commands::View { id, image }) => handle_view(&ctx, &id, image),
        Some(Commands::Order { id }) => handle_order(&ctx, &id),
        Some(Commands::Login { username, password }) => {
            handle_login(&mut ctx, &username, &password)
        }
        Some(Commands::Logout) => handle_logout(&mut ctx),
        Some(Commands::Status) => handle_status(&ctx),
        Some(Commands::Admin { search }) => handle_admin(&ctx, search),
        Some(Commands::Add(fields)) => handle_add(&mut ctx, fields),
        Some(Commands::Edit {
            id,
            fields,
            clear_images,
            not_new,
        }) => handle_edit(&mut ctx, &id, fields, clear_images, not_new),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

/// Diagnostics go to stderr so stdout stays clean for output. `RUST_LOG`
/// wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "storefront=debug,storefront_cli=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let config = StorefrontConfig::load(&data_dir)?.with_env_overrides();
    let mut api = StorefrontApi::new(FsBackend::new(data_dir.clone()), config);
    api.subscribe(|event| match event {
        SessionEvent::LoggedIn { username } => tracing::debug!(%username, "session started"),
        SessionEvent::LoggedOut => tracing::debug!("session ended"),
    });

    Ok(AppContext { api, data_dir })
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            StoreError::Config(
                "Could not determine a data directory; pass --data-dir".to_string(),
            )
        })
}

fn handle_list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let ceiling = ctx.api.config().price_ceiling;

    let mut filter = ProductFilter::new()
        .with_price_range(args.min.unwrap_or(0.0), args.max.unwrap_or(ceiling));
    if let Some(category) = args.category {
        filter = filter.with_category(category);
    }
    if let Some(product_type) = args.product_type {
        filter = filter.with_type(product_type);
    }
    if let Some(search) = args.search {
        filter = filter.with_search(search);
    }
    if args.new {
        filter = filter.only_new();
    }

    let mut query = Query::new(filter, args.sort);
    if let Some(limit) = args.limit {
        query = query.with_limit(limit);
    }

    let result = ctx.api.list_products(&query);
    let empty = if query.filter.is_active(ceiling) {
        "No products match your filters."
    } else {
        "No products yet."
    };
    print_products(&result.listed_products, empty);

    let active = query.active_count(ceiling);
    if active > 0 && !result.listed_products.is_empty() {
        print_messages(&[CmdMessage::info(format!("Filters active: {}", active))]);
    }
    Ok(())
}

fn handle_category(ctx: &AppContext, category: Category) -> Result<()> {
    let result = ctx.api.category_products(category);
    println!("{}", category.label());
    print_products(
        &result.listed_products,
        &format!("No {} products yet.", category.as_str()),
    );
    Ok(())
}

fn handle_new(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.new_arrivals();
    print_products(&result.listed_products, "No new arrivals.");
    Ok(())
}

fn handle_view(ctx: &AppContext, id: &str, image: Option<usize>) -> Result<()> {
    let result = ctx.api.view_product(id)?;
    for product in &result.listed_products {
        print_product(product, image);
    }
    Ok(())
}

fn handle_order(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.order_product(id)?;
    if let Some(link) = &result.order {
        print_order(link);
    }
    Ok(())
}

fn handle_login(ctx: &mut AppContext, username: &str, password: &str) -> Result<()> {
    let result = ctx.api.login(username, password)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_logout(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.logout()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    match ctx.api.session() {
        Some(claims) => println!("Logged in as {} ({})", claims.username, claims.role),
        None => println!("Not logged in"),
    }
    Ok(())
}

fn handle_admin(ctx: &AppContext, search: Option<String>) -> Result<()> {
    let result = ctx.api.admin_products(search.as_deref().unwrap_or(""))?;
    print_products(&result.listed_products, "No products found.");
    Ok(())
}

fn handle_add(ctx: &mut AppContext, fields: ProductArgs) -> Result<()> {
    let uploads = fields.uploads.clone();
    let form = ProductForm {
        name: fields.name.unwrap_or_default(),
        category: fields
            .category
            .unwrap_or_else(|| Category::Silk.to_string()),
        product_type: fields.product_type,
        price: fields.price.unwrap_or_default(),
        description: fields.description.unwrap_or_default(),
        images: fields.images,
        is_new: fields.new,
    };
    let draft = form
        .into_draft()
        .map_err(StoreError::Validation)
        .map_err(report_violations)?;

    let result = if uploads.is_empty() {
        ctx.api.create_product(&draft).map_err(report_violations)?
    } else {
        let host = image_host(ctx)?;
        ctx.api
            .create_product_with_uploads(&host, draft, &uploads)
            .map_err(report_violations)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    fields: ProductArgs,
    clear_images: bool,
    not_new: bool,
) -> Result<()> {
    let current = ctx
        .api
        .view_product(id)?
        .listed_products
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::ProductNotFound(id.to_string()))?;
    let base = ProductDraft::from_product(&current);

    let mut images = if clear_images { Vec::new() } else { base.images };
    images.extend(fields.images);

    let is_new = if fields.new {
        true
    } else if not_new {
        false
    } else {
        base.is_new
    };

    // Without --type the stored type survives unless the category changes.
    let form = ProductForm {
        name: fields.name.unwrap_or(base.name),
        category: fields.category.unwrap_or(base.category),
        product_type: fields.product_type,
        price: fields.price.unwrap_or_else(|| base.price.to_string()),
        description: fields.description.unwrap_or(base.description),
        images,
        is_new,
    };
    let draft = form
        .into_draft()
        .map_err(StoreError::Validation)
        .map_err(report_violations)?;

    let result = if fields.uploads.is_empty() {
        ctx.api.update_product(id, &draft).map_err(report_violations)?
    } else {
        let host = image_host(ctx)?;
        ctx.api
            .update_product_with_uploads(&host, id, draft, &fields.uploads)
            .map_err(report_violations)?
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.delete_product(id)?;
    print_messages(&result.messages);
    Ok(())
}

/// Show each violation on its own line before the error itself is reported.
fn report_violations(err: StoreError) -> StoreError {
    print_messages(&violation_messages(err.violations()));
    err
}

fn image_host(ctx: &AppContext) -> Result<CloudinaryHost> {
    let settings = ctx.api.config().image_host.clone().ok_or_else(|| {
        StoreError::Config(
            "No image host configured; set cloud-name and upload-preset".to_string(),
        )
    })?;
    CloudinaryHost::new(settings)
}

/// Reads and writes the file on disk rather than the env-overlaid config the
/// API holds, so environment values never get persisted.
fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = StorefrontConfig::load(&ctx.data_dir)?;

    match (key, value) {
        (None, _) => {
            let effective = ctx.api.config();
            for key in CONFIG_KEYS {
                print_config_entry(key, &effective.get(key)?);
            }
        }
        (Some(key), None) => {
            println!("{}", ctx.api.config().get(&key)?);
        }
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&ctx.data_dir)?;
            tracing::info!(path = %ctx.data_dir.display(), "config saved");
            print_messages(&[CmdMessage::success(format!(
                "{} = {}",
                key,
                config.get(&key)?
            ))]);
        }
    }
    Ok(())
}

