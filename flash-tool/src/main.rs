mod cli;
mod file_flash;

use std::fs::{self, OpenOptions};
use std::io;

use block_dev::{BlockDevice, IoctlOp};
use clap::Parser;
use embedded_storage::nor_flash::NorFlash;
use flash_bdev::FlashBdev;
use typed_bytesize::ByteSizeIec;

pub use self::{
    cli::{Cli, Command},
    file_flash::FileFlash,
};

fn main() -> io::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    log::info!("image={:?} user_start={:#x}", cli.image, cli.user_start);

    if let Command::Create { size } = cli.command {
        let fd = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&cli.image)?;
        let flash = FileFlash::create(fd, size)?;
        println!("created {:?}: {}", cli.image, ByteSizeIec(size));
        return report(FlashBdev::probe(flash, cli.user_start).as_ref());
    }

    let fd = OpenOptions::new().read(true).write(true).open(&cli.image)?;
    let bdev = FlashBdev::probe(FileFlash::open(fd)?, cli.user_start);
    let Some(bdev) = bdev else {
        return report::<FileFlash>(None);
    };

    match cli.command {
        Command::Create { .. } => unreachable!(),
        Command::Info => report(Some(&bdev))?,
        Command::Erase { block } => {
            bdev.ioctl(IoctlOp::BlockErase(block)).map_err(io::Error::other)?;
            println!("erased block {block}");
        }
        Command::Dump { block, out } => {
            let mut data = vec![0u8; bdev.block_size()];
            bdev.read_blocks(block, 0, &mut data)
                .map_err(io::Error::other)?;
            match out {
                Some(path) => fs::write(path, &data)?,
                None => hexdump(&data),
            }
        }
        Command::Load { block, input } => {
            let mut data = fs::read(&input)?;
            if data.len() > bdev.block_size() {
                return Err(io::Error::other(format!(
                    "{input:?} is larger than a block ({})",
                    ByteSizeIec(bdev.block_size() as u64)
                )));
            }
            // 补齐到编程粒度
            data.resize(data.len().next_multiple_of(4), 0xFF);
            bdev.write_blocks(block, None, &data)
                .map_err(io::Error::other)?;
            println!("loaded {} bytes into block {block}", data.len());
        }
    }

    Ok(())
}

fn report<F>(bdev: Option<&FlashBdev<F>>) -> io::Result<()>
where
    F: NorFlash + Send + 'static,
{
    let Some(bdev) = bdev else {
        println!("no block device: flash smaller than 1MiB or filled by the user area");
        return Ok(());
    };
    let layout = bdev.layout();
    let count = bdev.ioctl(IoctlOp::BlockCount).map_err(io::Error::other)?;
    let size = bdev.ioctl(IoctlOp::BlockSize).map_err(io::Error::other)?;
    println!(
        "start sector={} blocks={} block size={} total={}",
        usize::from(layout.start),
        count.unwrap_or_default(),
        size.unwrap_or_default(),
        ByteSizeIec(layout.len() as u64)
    );
    Ok(())
}

fn hexdump(data: &[u8]) {
    for (i, line) in data.chunks(16).enumerate() {
        let hex: Vec<String> = line.iter().map(|b| format!("{b:02x}")).collect();
        println!("{:08x}  {}", i * 16, hex.join(" "));
    }
}
