use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::image::progress::ProgressEvent;

const CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_APPENDER: &str = "stderr";
const FALLBACK_PATTERN: &str = "{l} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if Path::new(CONFIG_FILE).is_file() {
        match log4rs::init_file(CONFIG_FILE, Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Unable to load {}: {}", CONFIG_FILE, e),
        }
    }
    if let Err(e) = init_fallback() {
        eprintln!("Unable to initialize logging: {}", e);
    }
}

fn init_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build(FALLBACK_APPENDER, Box::new(stderr)))
        .build(
            Root::builder()
                .appender(FALLBACK_APPENDER)
                .build(LevelFilter::Warn),
        )?;
    log4rs::init_config(config)?;
    Ok(())
}

pub fn log_progress(event: &ProgressEvent) {
    log::info!(
        "[{:>3.0}%] {} {}/{} {}",
        event.percent(),
        event.task_id,
        event.completed,
        event.total,
        event.status
    );
}
