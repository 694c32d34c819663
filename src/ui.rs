use crate::models::{HarvestRecord, LedgerView};

pub fn render_index(view: &LedgerView) -> String {
    INDEX_HTML
        .replace("{{AVERAGE}}", &format!("{:.2}", view.summary.average))
        .replace("{{TOTAL}}", &view.summary.total.to_string())
        .replace("{{EMPTY}}", EMPTY_STATE)
        .replace("{{ROWS}}", &render_rows(&view.records))
}

fn render_rows(records: &[HarvestRecord]) -> String {
    if records.is_empty() {
        return EMPTY_STATE.to_string();
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                r#"<tr data-index="{index}"><td>Dia {day}</td><td class="date">{date}</td><td class="qty" contenteditable="true">{qty}</td><td><button class="remove" title="Remover dia">❌</button></td></tr>"#,
                day = record.day,
                date = escape_html(&record.date),
                qty = record.quantity,
            )
        })
        .collect()
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const EMPTY_STATE: &str = r#"<tr><td colspan="4"><div class="empty-state"><h3>🥚 Nenhuma colheita registrada</h3><p>Adicione seu primeiro dia de colheita!</p></div></td></tr>"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Colheita de Ovos</title>
  <style>
    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .entry {
      display: flex;
      gap: 12px;
    }

    .entry input {
      flex: 1;
      border-radius: 999px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 12px 18px;
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.secondary {
      background: var(--accent-2);
    }

    button.remove {
      background: none;
      padding: 0;
      font-size: 1rem;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 18px;
      overflow: hidden;
    }

    th, td {
      padding: 10px 14px;
      text-align: left;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    td.date {
      font-size: 0.8rem;
      color: #666;
    }

    .empty-state {
      text-align: center;
      color: #8b857d;
    }

    .actions {
      display: flex;
      gap: 12px;
      flex-wrap: wrap;
    }

    .toast {
      position: fixed;
      top: 20px;
      right: 20px;
      padding: 15px 20px;
      border-radius: 8px;
      color: white;
      font-weight: 600;
      z-index: 1000;
      max-width: 300px;
      animation: slideIn 0.3s ease-out;
    }

    .toast[data-type="success"] {
      background: #4caf50;
    }

    .toast[data-type="error"] {
      background: #f44336;
    }

    @keyframes slideIn {
      from { opacity: 0; transform: translateX(100%); }
      to { opacity: 1; transform: translateX(0); }
    }

    @keyframes slideOut {
      from { opacity: 1; transform: translateX(0); }
      to { opacity: 0; transform: translateX(100%); }
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>🥚 Colheita de Ovos</h1>

    <section class="panel">
      <div class="stat"><span class="label">Média diária</span><span id="media" class="value">{{AVERAGE}}</span></div>
      <div class="stat"><span class="label">Total de ovos</span><span id="total" class="value">{{TOTAL}}</span></div>
    </section>

    <form class="entry" method="post" action="/days/add" id="entry">
      <input id="qtdOvos" name="quantity" type="number" min="0" step="any" placeholder="Ovos coletados hoje" />
      <button id="addDia" type="submit">Adicionar dia</button>
    </form>

    <table>
      <thead><tr><th>Dia</th><th>Data</th><th>Ovos</th><th></th></tr></thead>
      <tbody id="lista">{{ROWS}}</tbody>
    </table>

    <div class="actions">
      <button id="exportarDados" class="secondary" type="button">Exportar relatório</button>
      <button id="limparTudo" class="secondary" type="button">Limpar tudo</button>
    </div>
  </main>

  <script>
    const listaEl = document.getElementById('lista');
    const mediaEl = document.getElementById('media');
    const totalEl = document.getElementById('total');
    const inputEl = document.getElementById('qtdOvos');

    const notify = (message, type) => {
      const toast = document.createElement('div');
      toast.className = 'toast';
      toast.dataset.type = type;
      toast.textContent = message;
      document.body.appendChild(toast);
      setTimeout(() => {
        toast.style.animation = 'slideOut 0.3s ease-in forwards';
        setTimeout(() => toast.remove(), 300);
      }, 3000);
    };

    const render = (view) => {
      mediaEl.textContent = view.summary.average.toFixed(2);
      totalEl.textContent = view.summary.total;
      listaEl.innerHTML = '';

      if (!view.records.length) {
        listaEl.innerHTML = `{{EMPTY}}`;
        return;
      }

      view.records.forEach((record, index) => {
        const tr = document.createElement('tr');
        tr.dataset.index = index;

        const dia = document.createElement('td');
        dia.textContent = `Dia ${record.day}`;
        const data = document.createElement('td');
        data.className = 'date';
        data.textContent = record.date;
        const qtd = document.createElement('td');
        qtd.className = 'qty';
        qtd.contentEditable = 'true';
        qtd.textContent = record.quantity;
        const acoes = document.createElement('td');
        const remover = document.createElement('button');
        remover.className = 'remove';
        remover.title = 'Remover dia';
        remover.textContent = '❌';
        acoes.appendChild(remover);

        tr.append(dia, data, qtd, acoes);
        listaEl.appendChild(tr);
      });
    };

    const call = async (method, url, body) => {
      const options = { method, headers: {} };
      if (body !== undefined) {
        options.headers['Content-Type'] = 'application/json';
        options.body = JSON.stringify(body);
      }
      const response = await fetch(url, options);
      if (!response.ok) {
        const message = await response.text();
        notify(message || 'Erro inesperado!', 'error');
        const latest = await fetch('/api/records');
        if (latest.ok) {
          render(await latest.json());
        }
        return null;
      }
      return response;
    };

    const mutate = async (method, url, body, quiet) => {
      const response = await call(method, url, body);
      if (!response) {
        return;
      }
      const result = await response.json();
      render(result.view);
      if (!quiet) {
        notify(result.message, 'success');
      }
    };

    document.getElementById('entry').addEventListener('submit', async (event) => {
      event.preventDefault();
      await mutate('POST', '/api/records', { quantity: inputEl.value });
      inputEl.value = '';
    });

    listaEl.addEventListener('click', async (event) => {
      const button = event.target.closest('button.remove');
      if (!button) {
        return;
      }
      if (!confirm('Tem certeza que deseja remover este dia?')) {
        return;
      }
      const index = button.closest('tr').dataset.index;
      await mutate('DELETE', `/api/records/${index}`);
    });

    listaEl.addEventListener('keypress', (event) => {
      if (event.target.classList.contains('qty') && event.key === 'Enter') {
        event.preventDefault();
        event.target.blur();
      }
    });

    listaEl.addEventListener('focusout', async (event) => {
      if (!event.target.classList.contains('qty')) {
        return;
      }
      const index = event.target.closest('tr').dataset.index;
      await mutate('PUT', `/api/records/${index}`, { quantity: event.target.textContent }, true);
    });

    document.getElementById('limparTudo').addEventListener('click', async () => {
      if (!confirm('Tem certeza que deseja limpar todos os dados? Esta ação não pode ser desfeita.')) {
        return;
      }
      await mutate('DELETE', '/api/records');
    });

    document.getElementById('exportarDados').addEventListener('click', async () => {
      const response = await call('GET', '/api/export');
      if (!response) {
        return;
      }
      const disposition = response.headers.get('Content-Disposition') || '';
      const match = disposition.match(/filename="([^"]+)"/);
      const blob = await response.blob();
      const url = URL.createObjectURL(blob);
      const link = document.createElement('a');
      link.href = url;
      link.download = match ? match[1] : 'colheita-ovos.txt';
      link.click();
      URL.revokeObjectURL(url);
      notify('Dados exportados com sucesso!', 'success');
    });
  </script>
</body>
</html>
"#;
