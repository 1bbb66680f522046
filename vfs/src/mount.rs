use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{Error, Volume};

/// 挂载点表
///
/// 路径按最长匹配的挂载点解析；相对路径视为相对于根目录。
#[derive(Default)]
pub struct MountTable {
    mounts: Vec<(String, Box<dyn Volume>)>,
}

impl core::fmt::Debug for MountTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.mounts.iter().map(|(point, _)| point))
            .finish()
    }
}

impl MountTable {
    pub const fn new() -> Self {
        Self { mounts: Vec::new() }
    }

    pub fn mount(&mut self, point: &str, volume: impl Volume + 'static) -> Result<(), Error> {
        let point = normalize(point);
        if self.mounts.iter().any(|(p, _)| *p == point) {
            return Err(Error::AlreadyMounted);
        }
        log::info!("mount {point}");
        self.mounts.push((point, Box::new(volume)));
        Ok(())
    }

    pub fn umount(&mut self, point: &str) -> Result<Box<dyn Volume>, Error> {
        let point = normalize(point);
        let index = self
            .mounts
            .iter()
            .position(|(p, _)| *p == point)
            .ok_or(Error::NotMounted)?;
        log::info!("umount {point}");
        Ok(self.mounts.remove(index).1)
    }

    pub fn is_mounted(&self, point: &str) -> bool {
        let point = normalize(point);
        self.mounts.iter().any(|(p, _)| *p == point)
    }

    pub fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), Error> {
        let path = normalize(path);
        let (volume, relat) = self.resolve(&path)?;
        volume.write_file(relat, data)
    }

    pub fn read_file(&mut self, path: &str) -> Result<Vec<u8>, Error> {
        let path = normalize(path);
        let (volume, relat) = self.resolve(&path)?;
        volume.read_file(relat)
    }

    /// 返回`(卷, 卷内路径)`
    fn resolve<'a>(&mut self, path: &'a str) -> Result<(&mut dyn Volume, &'a str), Error> {
        let (volume, relat) = self
            .mounts
            .iter_mut()
            .filter_map(|(point, volume)| {
                strip_mount_point(path, point.as_str()).map(|relat| (point.len(), volume, relat))
            })
            .max_by_key(|(len, ..)| *len)
            .map(|(_, volume, relat)| (volume, relat))
            .ok_or(Error::NotMounted)?;
        if relat.is_empty() {
            return Err(Error::IsADirectory);
        }
        Ok((&mut **volume, relat))
    }
}

/// 返回以`/`开头、非根时不以`/`结束的路径
fn normalize(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    let mut abs = String::with_capacity(trimmed.len() + 1);
    abs.push('/');
    abs.push_str(trimmed);
    abs
}

fn strip_mount_point<'a>(path: &'a str, point: &str) -> Option<&'a str> {
    if point == "/" {
        return path.strip_prefix('/');
    }
    match path.strip_prefix(point)? {
        "" => Some(""),
        rest => rest.strip_prefix('/'),
    }
}
