//! WAV encoding for 16-bit mono PCM.

use hound::{SampleFormat, WavSpec, WavWriter};
use lily_ir::SAMPLE_RATE;
use std::io::{Cursor, Seek, Write};

fn spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Voice output is a multiple of 1/32768, so this is exact.
fn to_pcm(sample: f32) -> i16 {
    (sample * 32768.0).round().clamp(-32768.0, 32767.0) as i16
}

pub fn write_wav<W: Write + Seek>(w: W, samples: &[f32]) -> Result<(), hound::Error> {
    let mut writer = WavWriter::new(w, spec())?;
    for &s in samples {
        writer.write_sample(to_pcm(s))?;
    }
    writer.finalize()
}

pub fn samples_to_wav(samples: &[f32]) -> Result<Vec<u8>, hound::Error> {
    let mut buf = Cursor::new(Vec::new());
    write_wav(&mut buf, samples)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn header_is_mono_16_bit() {
        let wav = samples_to_wav(&[0.0; 10]).unwrap();
        let reader = WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec(), spec());
        assert_eq!(reader.len(), 10);
    }

    #[test]
    fn quantized_samples_survive_encoding() {
        let samples = [-1.0, -0.5, 0.0, 0x1000 as f32 / 32768.0, 32767.0 / 32768.0];
        let wav = samples_to_wav(&samples).unwrap();
        let decoded: Vec<i16> = WavReader::new(Cursor::new(wav))
            .unwrap()
            .into_samples::<i16>()
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(decoded, [-32768, -16384, 0, 0x1000, 32767]);
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(to_pcm(2.0), 32767);
        assert_eq!(to_pcm(-2.0), -32768);
    }
}
