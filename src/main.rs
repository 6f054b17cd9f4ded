use std::env;

use tracing_subscriber::EnvFilter;

use liquidityprofile::configuration::Configuration;
use liquidityprofile::liquidity::binner::BinLiquidity;
use liquidityprofile::liquidity::side::Side;
use liquidityprofile::manager::manager::IManager;

const DEFAULT_CONFIG_PATH: &str = "json/config.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());
    let config = Configuration::from_reader(&config_path)?;
    let names = match args.next() {
        Some(name) => vec![name],
        None => config.profile_manager().names()
    };

    for name in names.iter() {
        let profile = config.generate(name)?;
        println!("# {} (reference price {})", name, profile.reference_price());
        for side in [Side::Below, Side::Above] {
            let side_profile = profile.side(side);
            let curve = side_profile.curve();
            for (price, liquidity) in curve.prices().iter().zip(curve.liquidity().iter()) {
                println!("{}, {:.4}, {:.6}", side, price, liquidity);
            }
            if let Some(binned) = side_profile.binned() {
                for bin in binned.bins() {
                    match bin.liquidity() {
                        BinLiquidity::Mean(mean) => println!("{} bin, {:.4}, {:.6}", side, bin.center_price(), mean),
                        BinLiquidity::NoData => println!("{} bin, {:.4}, no data", side, bin.center_price())
                    }
                }
            }
        }
        println!("{}", serde_json::to_string_pretty(&profile)?);
    }
    Ok(())
}
