#![allow(clippy::unwrap_used, clippy::expect_used)]
use {
    keyseal_cipher::{Cipher, CipherOptions, KdfParams, armor, dearmor},
    std::path::{Path, PathBuf},
    tempfile::TempDir,
};

const PASSWORD: &str = "IAmAStr0ngPassW0rd";
const LICENSE: &[u8] = b"{license: feature1, expdate: 1726142400}";
const TAMPERED_LICENSE: &[u8] = b"{license: feature1, expdate: 1757678400}";
const MESSAGE: &[u8] = b"This is a test message.";

fn fast_cipher(password: &str) -> Cipher {
    let options = CipherOptions {
        kdf: KdfParams {
            m_cost: 256,
            t_cost: 1,
            p_cost: 1,
        },
        ..CipherOptions::default()
    };
    Cipher::with_options(password, &options).unwrap()
}

fn write_license(dir: &Path, contents: &[u8]) -> PathBuf {
    let path = dir.join("license.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn signature_generation_and_verification() {
    let dir = TempDir::new().unwrap();
    let path = write_license(dir.path(), LICENSE);
    let cipher = fast_cipher(PASSWORD);

    let signature = cipher.signature(&path).unwrap();
    assert!(cipher.verify_signature(&path, &signature).unwrap());
}

#[test]
fn signature_invalid_after_file_change() {
    let dir = TempDir::new().unwrap();
    let path = write_license(dir.path(), LICENSE);
    let cipher = fast_cipher(PASSWORD);

    let signature = cipher.signature(&path).unwrap();
    write_license(dir.path(), TAMPERED_LICENSE);

    assert!(!cipher.verify_signature(&path, &signature).unwrap());
}

#[test]
fn signature_survives_armoring() {
    let dir = TempDir::new().unwrap();
    let path = write_license(dir.path(), LICENSE);
    let cipher = fast_cipher(PASSWORD);

    let sig_path = dir.path().join("license.txt.sig");
    std::fs::write(&sig_path, armor(&cipher.signature(&path).unwrap())).unwrap();

    let stored = dearmor(&std::fs::read_to_string(&sig_path).unwrap()).unwrap();
    assert!(cipher.verify_signature(&path, &stored).unwrap());
}

#[test]
fn signature_not_transferable_between_passwords() {
    let dir = TempDir::new().unwrap();
    let path = write_license(dir.path(), LICENSE);

    let signature = fast_cipher(PASSWORD).signature(&path).unwrap();
    assert!(
        !fast_cipher("WrongPassword")
            .verify_signature(&path, &signature)
            .unwrap()
    );
}

#[test]
fn encryption_and_decryption() {
    let cipher = fast_cipher(PASSWORD);

    let ciphertext = cipher.encrypt(MESSAGE).unwrap();
    assert_eq!(cipher.decrypt(&ciphertext), MESSAGE);
}

#[test]
fn attack_with_wrong_password() {
    let cipher = fast_cipher(PASSWORD);
    let attacker = fast_cipher("WrongPassword");

    let ciphertext = cipher.encrypt(MESSAGE).unwrap();
    let decrypted = attacker.decrypt(&ciphertext);
    assert_ne!(decrypted, MESSAGE);
    assert!(decrypted.is_empty());
}

#[test]
fn rainbow_protection() {
    let cipher = fast_cipher(PASSWORD);

    let ciphertext1 = cipher.encrypt(MESSAGE).unwrap();
    let ciphertext2 = cipher.encrypt(MESSAGE).unwrap();
    assert_ne!(ciphertext1, ciphertext2);
    assert_eq!(cipher.decrypt(&ciphertext1), MESSAGE);
    assert_eq!(cipher.decrypt(&ciphertext2), MESSAGE);
}

#[test]
fn uninitialized_cipher() {
    let uninitialized = fast_cipher("");
    assert!(uninitialized.decrypt(b"Some ciphertext").is_empty());
}

#[test]
fn shared_across_threads() {
    let cipher = std::sync::Arc::new(fast_cipher(PASSWORD));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let cipher = std::sync::Arc::clone(&cipher);
            std::thread::spawn(move || {
                let msg = format!("message {i}");
                let sealed = cipher.encrypt(msg.as_bytes()).unwrap();
                assert_eq!(cipher.decrypt(&sealed), msg.as_bytes());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
