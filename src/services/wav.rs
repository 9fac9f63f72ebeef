use std::io::Cursor;

/// Wrap raw PCM (mono, 16-bit little-endian) into a minimal WAV container.
///
/// The transcription endpoint only accepts file-shaped audio, so every chunk
/// is framed on the way out. A trailing odd byte cannot form a sample and is
/// dropped.
pub fn wrap_pcm(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for pair in pcm.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([pair[0], pair[1]]))?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}
