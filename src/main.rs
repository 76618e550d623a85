mod driver;
mod util;

fn main() -> anyhow::Result<()> {
    driver::main_inner()
}
