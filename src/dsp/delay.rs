/// Circular delay line with a fixed capacity and a per-call length.
///
/// The buffer is allocated once; the logical length is a runtime modulus, so
/// tempo changes never reallocate. Each sample reads the slot about to be
/// overwritten, which is exactly `length` samples old once the line has
/// cycled.
pub struct FeedbackDelay {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl FeedbackDelay {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(1)],
            write_pos: 0,
        }
    }

    /// Mix the delayed signal back in and store the result.
    ///
    /// `length` is clamped to `1..=capacity`.
    #[inline]
    pub fn next_sample(&mut self, input: f32, feedback: f32, length: usize) -> f32 {
        let length = length.clamp(1, self.buffer.len());

        // write_pos is always below the previous length, itself <= capacity
        let output = input + self.buffer[self.write_pos] * feedback;
        self.buffer[self.write_pos] = output;
        self.write_pos = (self.write_pos + 1) % length;

        output
    }

    pub fn render(&mut self, buffer: &mut [f32], feedback: f32, length: usize) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, feedback, length);
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
