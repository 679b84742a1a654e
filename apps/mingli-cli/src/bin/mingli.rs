use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use mingli_core::data_processor::{ChunkVariant, DataProcessor};
use mingli_core::traits::Retriever;
use mingli_divination::{BirthInput, Cast, ChartStyle, DivinationEngine, Gender, LiuyaoChart, MeihuaChart};
use mingli_retrieval::KnowledgeBase;

/// 命理 knowledge retrieval and chart casting.
#[derive(Parser)]
#[command(name = "mingli", version, about)]
struct Cli {
    /// Verbosity (-v, -vv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding config.toml; defaults to the working directory
    #[arg(long, env = "MINGLI_CONFIG_DIR", global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split raw `.txt` books into JSON chunk files under knowledge.chunks_dir
    Chunk {
        books: PathBuf,
        /// Books are the vernacular (白话) edition
        #[arg(long)]
        baihua: bool,
    },
    /// Rebuild the vector store from the chunk directory
    Build {
        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print reference passages for a question
    Retrieve {
        query: String,
        /// Number of passages; defaults to retrieval.top_k
        #[arg(short, long)]
        k: Option<usize>,
    },
    /// 梅花易数 chart from three numbers, or from the current time
    Meihua(CastArgs),
    /// 六爻 chart from three numbers, or from the current time
    Liuyao(CastArgs),
    /// 八字 birth chart
    Bazi(BaziArgs),
    /// Current civil, lunar and sexagenary time
    Time,
}

#[derive(clap::Args)]
struct CastArgs {
    /// Seed numbers; fewer than three casts from the current time
    #[arg(allow_negative_numbers = true)]
    numbers: Vec<i64>,
    /// Print the chart as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Sex {
    Male,
    Female,
}

#[derive(clap::Args)]
struct BaziArgs {
    year: i32,
    #[arg(allow_negative_numbers = true)]
    month: i32,
    day: u32,
    hour: u32,
    #[arg(default_value_t = 0)]
    minute: u32,
    #[arg(long, value_enum, default_value_t = Sex::Male)]
    sex: Sex,
    /// Date is a lunar date (negative month for a leap month)
    #[arg(long)]
    lunar: bool,
    #[arg(long)]
    json: bool,
}

fn knowledge_base(cli: &Cli) -> anyhow::Result<KnowledgeBase> {
    let config = mingli_cli::load_config(cli.config_dir.as_deref())?;
    KnowledgeBase::open(&config).context("opening knowledge base")
}

fn engine(cli: &Cli) -> anyhow::Result<DivinationEngine> {
    let config = mingli_cli::load_config(cli.config_dir.as_deref())?;
    let settings = config.settings().context("invalid settings")?;
    Ok(DivinationEngine::from_settings(&settings.calendar))
}

fn print_cast(engine: &DivinationEngine, style: ChartStyle, args: &CastArgs) -> anyhow::Result<()> {
    if !args.json {
        println!("{}", engine.compute_chart(style, &args.numbers));
        return Ok(());
    }
    let cast: Cast = engine.cast(&args.numbers);
    let body = match style {
        ChartStyle::Meihua => serde_json::to_string_pretty(&MeihuaChart::from_cast(&cast))?,
        ChartStyle::Liuyao => serde_json::to_string_pretty(&LiuyaoChart::from_cast(&cast))?,
    };
    println!("{body}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    mingli_cli::init_tracing(cli.verbose);

    match &cli.command {
        Command::Chunk { books, baihua } => {
            let kb = knowledge_base(&cli)?;
            let processor = DataProcessor::with_config(kb.settings().chunking.clone());
            let chunks = processor.process_directory(books, baihua.then_some(ChunkVariant::BAIHUA))?;
            let written = processor.write_chunks(&chunks, kb.chunks_dir())?;
            println!("wrote {written} chunks to {}", kb.chunks_dir().display());
        }
        Command::Build { quiet } => {
            let kb = knowledge_base(&cli)?;
            let rows = kb.rebuild_vector_store(!quiet)?;
            println!("indexed {rows} chunks into {}", kb.store_dir().display());
        }
        Command::Retrieve { query, k } => {
            let kb = knowledge_base(&cli)?;
            let k = k.unwrap_or(kb.settings().retrieval.top_k);
            let text = kb.retrieve(query, k);
            if text.is_empty() {
                eprintln!("no reference passages found");
            } else {
                println!("{text}");
            }
        }
        Command::Meihua(args) => print_cast(&engine(&cli)?, ChartStyle::Meihua, args)?,
        Command::Liuyao(args) => print_cast(&engine(&cli)?, ChartStyle::Liuyao, args)?,
        Command::Bazi(args) => {
            let engine = engine(&cli)?;
            let gender = match args.sex {
                Sex::Male => Gender::Male,
                Sex::Female => Gender::Female,
            };
            let input = BirthInput {
                year: args.year,
                month: args.month,
                day: args.day,
                hour: args.hour,
                minute: args.minute,
                gender,
                lunar: args.lunar,
            };
            if args.json {
                let chart = engine.bazi_chart(&input)?;
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                println!("{}", engine.compute_bazi(&input));
            }
        }
        Command::Time => println!("{}", engine(&cli)?.get_time_context()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_month_parses_as_negative() {
        let cli = Cli::try_parse_from(["mingli", "bazi", "2023", "-2", "1", "12", "--lunar", "--sex", "female"])
            .expect("parse");
        let Command::Bazi(args) = cli.command else {
            panic!("expected bazi");
        };
        assert_eq!((args.year, args.month, args.day, args.hour, args.minute), (2023, -2, 1, 12, 0));
        assert!(args.lunar);
    }
}
