pub mod fft;
pub mod snr;
