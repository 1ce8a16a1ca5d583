use clap::Args;
use umkm_app::{
    database::{self, Db},
    domain::goods::{
        GoodsService, PgGoodsService,
        models::{GoodsQuery, GoodsSortField, SortDirection},
    },
};

#[derive(Debug, Args)]
pub(crate) struct ListGoodsArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,

    #[arg(long, default_value_t = GoodsQuery::DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// One of id, name, stock, price
    #[arg(long, default_value = "id")]
    sort_by: GoodsSortField,

    /// ASC or DESC
    #[arg(long, default_value = "DESC")]
    sort: SortDirection,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListGoodsArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let goods = PgGoodsService::new(Db::new(pool))
        .list_goods(GoodsQuery {
            page: args.page,
            page_size: args.page_size,
            sort_by: args.sort_by,
            direction: args.sort,
        })
        .await
        .map_err(|error| format!("failed to list goods: {error}"))?;

    if goods.is_empty() {
        println!("no goods on page {}", args.page);
        return Ok(());
    }

    for item in goods {
        println!(
            "{}\t{}\tstock={}\tprice={}",
            item.id, item.name, item.stock, item.price
        );
    }

    Ok(())
}
