/// 运行时垃圾回收器的钩子
pub trait Heap {
    fn collect(&mut self);

    fn mem_free(&self) -> usize;

    fn mem_alloc(&self) -> usize;

    /// 分配量达到该字节数时触发回收
    fn set_threshold(&mut self, bytes: usize);
}

/// 空闲内存的四分之一加上已分配量
#[inline]
pub const fn gc_threshold(free: usize, alloc: usize) -> usize {
    free / 4 + alloc
}

/// Collects once and rearms the collector; returns the threshold it set.
pub fn tune(heap: &mut impl Heap) -> usize {
    heap.collect();
    let threshold = gc_threshold(heap.mem_free(), heap.mem_alloc());
    heap.set_threshold(threshold);
    log::debug!("gc threshold={threshold}");
    threshold
}
