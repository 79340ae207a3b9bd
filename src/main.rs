//! Interactive console driver.
//! Analyzes text typed into the console or read from a file until `exit`.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use ru_sentiment_analyzer::encoding::decode_text;
use ru_sentiment_analyzer::{init_tracing, AppConfig, SentimentAnalyzer, SentimentResult};

const EXIT_KEYWORD: &str = "exit";

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op otherwise.
    let _ = dotenvy::dotenv();
    init_tracing("warn");

    let cfg = AppConfig::load_default()?;
    let analyzer = SentimentAnalyzer::from_config(&cfg);
    if analyzer.lexicon().is_empty() {
        println!(
            "Словарь не загружен ({}), все оценки будут нейтральными.",
            cfg.lexicon_path.display()
        );
    }

    let mut input: Input = BufReader::new(tokio::io::stdin()).lines();

    println!("=== Анализатор тональности текста ===");
    println!("Для выхода из программы наберите '{EXIT_KEYWORD}'.");

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Ваш выбор: ").await? else {
            break;
        };
        if choice.eq_ignore_ascii_case(EXIT_KEYWORD) {
            println!("Программа завершена. До свидания!");
            break;
        }

        let text = match choice.as_str() {
            "1" => text_from_file(&mut input).await,
            "2" => text_from_console(&mut input).await,
            _ => {
                println!("Неверный входной формат. Пожалуйста, выберите 1, 2 или {EXIT_KEYWORD}.");
                continue;
            }
        };

        match text {
            Ok(Some(text)) => {
                println!("Анализируем текст...");
                let result = analyzer.analyze(&text).await;
                print_result(&result);
            }
            Ok(None) => {}
            // One failed iteration must not end the session.
            Err(e) => println!("Произошла ошибка: {e:#}"),
        }
    }
    Ok(())
}

fn print_menu() {
    println!("\n{}", "=".repeat(50));
    println!("Выберите режим работы:");
    println!("1 - Анализ тональности из файла");
    println!("2 - Анализ тональности из консоли");
    println!("{EXIT_KEYWORD} - Выход из программы");
}

fn print_result(r: &SentimentResult) {
    println!("\nРезультат анализа:");
    println!("Тональность: {}", r.sentiment);
    println!("Оценка: {:.3}", r.score);
    println!("Количество слов, учтенных в анализе: {}", r.word_count);
}

/// Print `label`, read one trimmed line. `None` on EOF.
async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush().context("flushing stdout")?;
    let line = input.next_line().await.context("reading stdin")?;
    Ok(line.map(|l| l.trim().to_string()))
}

async fn text_from_console(input: &mut Input) -> Result<Option<String>> {
    let text = prompt(input, "Введите текст для анализа:\n").await?.unwrap_or_default();
    if text.is_empty() {
        println!("Текст не может быть пустым.");
        return Ok(None);
    }
    Ok(Some(text))
}

async fn text_from_file(input: &mut Input) -> Result<Option<String>> {
    let path = prompt(input, "Введите полный путь к файлу:\n").await?.unwrap_or_default();
    if path.is_empty() {
        println!("Путь к файлу не может быть пустым.");
        return Ok(None);
    }
    let path = Path::new(&path);
    if !path.exists() {
        println!("Файл не найден: {}", path.display());
        return Ok(None);
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let Some(content) = decode_text(&bytes) else {
        println!("Не удалось прочитать файл. Возможно, неподдерживаемая кодировка.");
        return Ok(None);
    };

    let text = join_non_empty_lines(&content);
    if text.is_empty() {
        println!("Файл пуст.");
        return Ok(None);
    }
    println!("Файл прочитан успешно ({} символов)", text.chars().count());
    Ok(Some(text))
}

fn join_non_empty_lines(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
