use std::{
    env,
    io::{self, Write},
};

use env_logger::Builder;
use geo_core::format::{self, BufferedWriter, Displayed};
use log::{Record, SetLoggerError};

pub const FILTER_ENV: &str = "GEO_LOG";
pub const DEFAULT_FILTER: &str = "info";

/// Renders `record` as `[LEVEL target] message` followed by a newline.
pub fn write_record<W: Write + ?Sized>(out: &mut W, record: &Record<'_>) -> io::Result<()> {
    let mut result = Ok(());

    {
        let mut writer = BufferedWriter::new(|chunk: &[u8]| {
            if result.is_ok() {
                result = out.write_all(chunk);
            }
        });

        format::write(
            &mut writer,
            "[{} {}] {}\n",
            &(Displayed(record.level()), record.target(), record.args()),
        );
    }

    result
}

/// A logger builder using `filters` (env_logger syntax) and the [`write_record`] layout.
pub fn builder(filters: &str) -> Builder {
    let mut builder = Builder::new();
    builder
        .parse_filters(filters)
        .format(|buf, record| write_record(buf, record));

    builder
}

/// Installs the console logger on stderr, filtered by the `GEO_LOG` environment variable.
pub fn init() -> Result<(), SetLoggerError> {
    let filters = env::var(FILTER_ENV).unwrap_or_else(|_| DEFAULT_FILTER.to_owned());
    builder(&filters).try_init()
}
