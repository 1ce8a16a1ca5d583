use clap::Args;
use rust_decimal::Decimal;
use umkm_app::{
    database::{self, Db},
    domain::goods::{GoodsService, PgGoodsService, models::NewGoods},
};

#[derive(Debug, Args)]
pub(crate) struct CreateGoodsArgs {
    /// Goods display name
    #[arg(long)]
    name: String,

    /// Unit price
    #[arg(long)]
    price: Decimal,

    /// Initial stock; negative values are stored as zero
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    stock: i64,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateGoodsArgs) -> Result<(), String> {
    let goods = NewGoods::new(args.name, args.stock, args.price)
        .map_err(|error| format!("invalid goods: {error}"))?;

    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let created = PgGoodsService::new(Db::new(pool))
        .create_goods(goods)
        .await
        .map_err(|error| format!("failed to create goods: {error}"))?;

    println!("goods_id: {}", created.id);
    println!("name: {}", created.name);
    println!("stock: {}", created.stock);
    println!("price: {}", created.price);

    Ok(())
}
