//! Feeding fixed-size render blocks into callbacks of any size.

use crate::renderer::Renderer;

/// Wraps a [`Renderer`] so output callbacks can ask for any number of frames.
///
/// Audio backends rarely hand out buffers that line up with the engine's
/// block size. The bridge keeps the last rendered block and renders the next
/// one only once every frame of it has been handed out.
pub struct BlockBridge {
    renderer: Renderer,
    block: Vec<f32>,
    cursor: usize,
}

impl BlockBridge {
    pub fn new(renderer: Renderer) -> Self {
        let len = renderer.block_len();
        Self {
            renderer,
            block: vec![0.0; len],
            cursor: len,
        }
    }

    /// Next stereo frame, rendering a fresh block when the current one is spent.
    #[inline]
    pub fn next_frame(&mut self) -> (f32, f32) {
        if self.cursor >= self.block.len() {
            self.renderer.render(&mut self.block);
            self.cursor = 0;
        }
        let frame = (self.block[self.cursor], self.block[self.cursor + 1]);
        self.cursor += 2;
        frame
    }

    /// Fill interleaved f32 output with `channels` channels per frame.
    pub fn fill(&mut self, out: &mut [f32], channels: usize) {
        self.fill_with(out, channels, |s| s);
    }

    /// Fill interleaved output, converting each sample with `convert`.
    ///
    /// Mono output gets the average of left and right. Channels past the
    /// second are silent.
    pub fn fill_with<T: Copy>(&mut self, out: &mut [T], channels: usize, convert: impl Fn(f32) -> T) {
        if channels == 0 {
            return;
        }
        let silence = convert(0.0);

        for frame in out.chunks_exact_mut(channels) {
            let (left, right) = self.next_frame();
            match frame {
                [mono] => *mono = convert((left + right) * 0.5),
                [l, r, rest @ ..] => {
                    *l = convert(left);
                    *r = convert(right);
                    rest.fill(silence);
                }
                [] => {}
            }
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn into_renderer(self) -> Renderer {
        self.renderer
    }
}
