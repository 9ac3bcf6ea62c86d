use std::{
    env,
    path::PathBuf,
    process,
    sync::Arc,
};

use rosscube::{
    power,
    scryfall::{
        CardDatabase,
        ScryfallClient,
        UnavailableDatabase,
    },
    CardPool,
    CubeError,
    DraftSession,
    PackSynergyAnalyzer,
    ScoringContext,
    SynergySettings,
};
use tracing::{
    error,
    info,
    warn,
};

struct Args {
    pool_path: PathBuf,
    pack1: String,
    offline: bool,
}

fn parse_args() -> Option<Args> {
    let mut positional = Vec::new();
    let mut offline = false;
    for arg in env::args().skip(1) {
        if arg == "--offline" {
            offline = true;
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let pool_path = PathBuf::from(positional.next()?);
    let pack1 = positional.next()?;
    Some(Args { pool_path, pack1, offline })
}

async fn run(args: Args) -> Result<(), CubeError> {
    let settings = SynergySettings::load_or_init().unwrap_or_else(|e| {
        let path = SynergySettings::settings_path();
        warn!("Could not read {}: {}. Using defaults.", path.display(), e);
        SynergySettings::default()
    });
    let pool = CardPool::from_json_file(&args.pool_path)?;

    let database: Arc<dyn CardDatabase> = if args.offline {
        info!("Offline mode: card metadata comes from the pool only");
        Arc::new(UnavailableDatabase)
    } else {
        Arc::new(ScryfallClient::new(&settings)?)
    };
    let analyzer = PackSynergyAnalyzer::new(database, &settings);

    let mut session = DraftSession::new(false);
    let ticket = session.select_pack1(&args.pack1);
    let candidates = session.candidates(&pool);
    let report = analyzer.sweep(&ticket, &candidates, &pool, &ScoringContext::default()).await;

    let Some(indicators) = session.accept(report) else {
        return Err(CubeError::Custom("sweep result went stale".to_string()));
    };

    let mut ranked: Vec<_> = indicators.iter().collect();
    ranked.sort_by(|a, b| b.1.value.total_cmp(&a.1.value).then_with(|| a.0.cmp(b.0)));

    println!("Synergy with '{}':", args.pack1);
    for (pack, result) in &ranked {
        let reasons = result.reasons.join("; ");
        println!("  {} {:+.1}  {}  ({})", result.tier().glyph(), result.value, pack, reasons);
    }

    let Some(best) = ranked.first().map(|(pack, _)| pack.to_string()) else {
        println!("No candidate packs could be scored.");
        return Ok(());
    };

    session.select_pack2(&best);
    let Some(deck) = session.build_deck(&pool) else {
        return Ok(());
    };

    let names: Vec<String> = deck.deck.iter().map(|card| card.name.clone()).collect();
    let records = analyzer.metadata().get(&names, &pool).await;
    let deck_power = power::score(&records, &[]);

    println!();
    println!("Deck '{}' + '{}': {} cards", args.pack1, best, deck.card_count);
    for (group, cards) in &deck.type_groups {
        if !cards.is_empty() {
            println!("  {:<24}{}", group.label(), cards.len());
        }
    }
    println!("Power: {} ({})", deck_power.score, deck_power.level());
    for (category, count) in deck_power.category_counts.iter().filter(|(_, count)| **count > 0) {
        println!("  {:<24}{}", category.label(), count);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(args) = parse_args() else {
        eprintln!("usage: rosscube <pool.json> <pack1> [--offline]");
        process::exit(2);
    };

    if let Err(e) = run(args).await {
        error!("{}", e);
        process::exit(1);
    }
}
