use std::env;
use std::process;

use wordbook::{
    Catalog, Dictionary, DictionaryRecord, DictionaryService, PersistenceMode, DEFAULT_SEPARATOR,
};

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <dict-file> [options] <command> [args]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --encoding <name>   file encoding (default UTF-8)");
    eprintln!("  --keys <language>   key language (default latin)");
    eprintln!("  --words <language>  word language (default latin)");
    eprintln!("  --separator <text>  key/word separator (default a single space)");
    eprintln!("  --lazy              defer the write-back until exit");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list                print every record");
    eprintln!("  get <key>           print the word for a key");
    eprintln!("  put <key> <word>    insert a record");
    eprintln!("  del <key>           remove a record");
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
    }

    let path = &args[1];
    let mut encoding = "UTF-8".to_string();
    let mut keys = "latin".to_string();
    let mut words = "latin".to_string();
    let mut separator = DEFAULT_SEPARATOR.to_string();
    let mut lazy = false;

    // Split options from the command and its arguments
    let mut command = Vec::new();
    let mut index = 2;
    while index < args.len() {
        match args[index].as_str() {
            option @ ("--encoding" | "--keys" | "--words" | "--separator") => {
                let Some(value) = args.get(index + 1) else {
                    eprintln!("ERROR: {} requires an argument", option);
                    process::exit(1);
                };
                match option {
                    "--encoding" => encoding = value.clone(),
                    "--keys" => keys = value.clone(),
                    "--words" => words = value.clone(),
                    _ => separator = value.clone(),
                }
                index += 2;
            }
            "--lazy" => {
                lazy = true;
                index += 1;
            }
            _ => {
                command.push(args[index].clone());
                index += 1;
            }
        }
    }
    if command.is_empty() {
        usage(&args[0]);
    }

    let dictionary = Dictionary::new(path, &encoding, &keys, &words).with_separator(&separator);
    let mode = if lazy {
        PersistenceMode::Lazy
    } else {
        PersistenceMode::Eager
    };
    let mut service = DictionaryService::new(Catalog::builtin(), mode);

    if let Err(error) = service.bind(dictionary) {
        eprintln!("ERROR: could not load dictionary: {}", error);
        process::exit(1);
    }

    let mutated = matches!(command[0].as_str(), "put" | "del");
    let result = match command[0].as_str() {
        "list" if command.len() == 1 => {
            for record in service.records() {
                println!("{}\t{}", record.key, record.word);
            }
            Ok(())
        }
        "get" if command.len() == 2 => match service.read(&command[1]) {
            Ok(Some(record)) => {
                println!("{}", record.word);
                Ok(())
            }
            Ok(None) => {
                eprintln!("{}: not found", command[1]);
                process::exit(1);
            }
            Err(error) => Err(error),
        },
        "put" if command.len() == 3 => {
            service.create(DictionaryRecord::new(&command[1], &command[2]))
        }
        "del" if command.len() == 2 => service.delete(&command[1]),
        _ => usage(&args[0]),
    };

    let result = result.and_then(|_| {
        if lazy && mutated {
            service.flush()
        } else {
            Ok(())
        }
    });

    if let Err(error) = result {
        eprintln!("ERROR: {}", error);
        process::exit(1);
    }
}
