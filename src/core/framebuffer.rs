use nalgebra::Vector4;
use std::cell::UnsafeCell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// A 2D buffer of linear RGBA colors plus depth.
/// Thread-safe for parallel rendering: depth lives in atomics, color writes
/// go through a pool of striped locks.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub sample_count: usize,
    pub buffer_width: usize,
    pub buffer_height: usize,

    /// Color buffer behind an UnsafeCell for interior mutability; writes are
    /// serialized per stripe by `locks`.
    color_buffer: UnsafeCell<Vec<Vector4<f32>>>,

    /// Depth stored as the bit pattern of an f32.
    pub depth_buffer: Vec<AtomicU32>,

    /// Striped locks protecting color writes. Pixel index maps to a lock
    /// index, trading exactness for far fewer mutexes than pixels.
    locks: Vec<Mutex<()>>,
}

// Thread safety is managed manually via the atomics and the lock pool.
unsafe impl Sync for FrameBuffer {}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        let buffer_width = width * sample_count;
        let buffer_height = height * sample_count;
        let size = buffer_width * buffer_height;

        let inf_bits = f32::INFINITY.to_bits();
        let mut depth_buffer = Vec::with_capacity(size);
        for _ in 0..size {
            depth_buffer.push(AtomicU32::new(inf_bits));
        }

        let lock_count = 1024;
        let mut locks = Vec::with_capacity(lock_count);
        for _ in 0..lock_count {
            locks.push(Mutex::new(()));
        }

        Self {
            width,
            height,
            sample_count,
            buffer_width,
            buffer_height,
            color_buffer: UnsafeCell::new(vec![Vector4::new(0.0, 0.0, 0.0, 1.0); size]),
            depth_buffer,
            locks,
        }
    }

    /// Resets every sample to the given color and depth.
    /// Must not be called while rendering is in flight.
    pub fn clear(&mut self, color: Vector4<f32>, depth: f32) {
        let buffer = self.color_buffer.get_mut();
        buffer.fill(color);
        let depth_bits = depth.to_bits();
        for atomic in &self.depth_buffer {
            atomic.store(depth_bits, Ordering::Relaxed);
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.buffer_width && y < self.buffer_height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.buffer_width + x
    }

    /// Thread-safe depth test and update.
    /// Returns true if the new depth is closer than the stored value, in
    /// which case the depth buffer was updated atomically.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, new_depth: f32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        let new_bits = new_depth.to_bits();
        let depth_atomic = &self.depth_buffer[idx];

        let mut current_bits = depth_atomic.load(Ordering::Relaxed);
        loop {
            let current_depth = f32::from_bits(current_bits);
            if new_depth >= current_depth {
                return false;
            }

            match depth_atomic.compare_exchange_weak(
                current_bits,
                new_bits,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(updated_bits) => current_bits = updated_bits,
            }
        }
    }

    /// Thread-safe pixel write. Call only after `depth_test_and_update`
    /// returned true for the same sample.
    #[inline]
    pub fn set_pixel_safe(&self, x: usize, y: usize, color: Vector4<f32>) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);

            let lock_idx = idx % self.locks.len();
            let _guard = self.locks[lock_idx].lock().unwrap();

            // The stripe lock serializes writers to this index.
            unsafe {
                let buffer = &mut *self.color_buffer.get();
                buffer[idx] = color;
            }
        }
    }

    /// Reads a display pixel, averaging the supersampled grid beneath it.
    /// Safe once rendering has finished; tearing is acceptable mid-render.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector4<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let buffer = unsafe { &*self.color_buffer.get() };

        if self.sample_count == 1 {
            return Some(buffer[self.index(x, y)]);
        }

        let mut sum = Vector4::zeros();
        let start_x = x * self.sample_count;
        let start_y = y * self.sample_count;

        for dy in 0..self.sample_count {
            for dx in 0..self.sample_count {
                sum += buffer[self.index(start_x + dx, start_y + dy)];
            }
        }

        let samples = (self.sample_count * self.sample_count) as f32;
        Some(sum / samples)
    }
}
