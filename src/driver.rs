use std::{
    env,
    io::{self, Write},
};

use anyhow::Context;
use geo_core::format::{self, BufferedWriter, DynValue, FormatSink, FormatStatus};

use crate::util::{
    args::{Args, USAGE},
    console,
};

pub fn main_inner() -> anyhow::Result<()> {
    // Initialize the logger
    console::init().context("failed to install the logger")?;

    let args = Args::parse(env::args().skip(1)).context("invalid command line")?;

    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    log::debug!(
        "{}",
        format::display(
            "radix {}, separator {}, {} value(s)",
            &(
                args.options.radix,
                args.options.separator.map_or('-', char::from),
                args.values.len(),
            ),
        )
    );

    let values = args
        .values
        .iter()
        .map(|value| value as &dyn DynValue)
        .collect::<Vec<_>>();

    let status = render(&args.format, &values, io::stdout().lock())
        .context("failed to write to stdout")?;

    if !status.is_ok() {
        log::warn!("`{}` contains sequences that could not be formatted", args.format);
    }

    Ok(())
}

/// Renders `fmt` to `out` followed by a newline.
pub fn render<W: Write>(
    fmt: &str,
    values: &[&dyn DynValue],
    mut out: W,
) -> io::Result<FormatStatus> {
    let mut result = Ok(());

    let status = {
        let mut writer = BufferedWriter::new(|chunk: &[u8]| {
            if result.is_ok() {
                result = out.write_all(chunk);
            }
        });

        let status = format::write(&mut writer, fmt, values);
        writer.put(b'\n');
        status
    };

    result?;
    out.flush()?;
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(fmt: &str, values: &[i64]) -> (String, FormatStatus) {
        let values = values
            .iter()
            .map(|value| value as &dyn DynValue)
            .collect::<Vec<_>>();

        let mut out = Vec::new();
        let status = render(fmt, &values, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), status)
    }

    #[test]
    fn renders_values() {
        assert_eq!(
            render_to_string("{:#x} {1:H} {0}", &[255, 1_000_000]),
            ("0xff 1'000'000 255\n".to_owned(), FormatStatus::Ok)
        );
    }

    #[test]
    fn reports_bad_sequences() {
        assert_eq!(
            render_to_string("{} {}", &[1]),
            ("1 {}\n".to_owned(), FormatStatus::CompletedWithErrors)
        );
    }

    #[test]
    fn surfaces_write_errors() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = render("text", &[], Broken).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
