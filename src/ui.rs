use crate::models::{DailyNutrition, InjectionRecord};
use crate::nutrition::percent_of_goal;

/// Render a counter amount without a trailing `.0` for whole numbers.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

pub fn render_landing() -> String {
    LANDING_HTML.replace("{{CSS}}", SHARED_CSS)
}

pub fn render_quiz() -> String {
    QUIZ_HTML.replace("{{CSS}}", SHARED_CSS)
}

pub fn render_checkout() -> String {
    CHECKOUT_HTML.replace("{{CSS}}", SHARED_CSS)
}

pub fn render_lock() -> String {
    LOCK_HTML.replace("{{CSS}}", SHARED_CSS)
}

pub fn render_dashboard(day: &DailyNutrition, last_injection: Option<&InjectionRecord>) -> String {
    DASHBOARD_HTML
        .replace("{{CSS}}", SHARED_CSS)
        .replace("{{DATE}}", &day.date.to_string())
        .replace("{{PROTEIN}}", &format_amount(day.protein))
        .replace("{{PROTEIN_GOAL}}", &format_amount(day.protein_goal))
        .replace(
            "{{PROTEIN_PCT}}",
            &percent_of_goal(day.protein, day.protein_goal).to_string(),
        )
        .replace("{{WATER}}", &format_amount(day.water))
        .replace("{{WATER_GOAL}}", &format_amount(day.water_goal))
        .replace(
            "{{WATER_PCT}}",
            &percent_of_goal(day.water, day.water_goal).to_string(),
        )
        .replace(
            "{{LAST_INJECTION}}",
            &last_injection
                .map(|record| record.date.to_string())
                .unwrap_or_else(|| "Nenhuma".to_string()),
        )
}

const SHARED_CSS: &str = r#"
    * { box-sizing: border-box; }
    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, #eff6ff, #faf5ff 50%, #fdf2f8);
      color: #1f2937;
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
      padding: 32px 18px 48px;
    }
    .shell { width: min(960px, 100%); margin: 0 auto; display: grid; gap: 24px; }
    .card {
      background: rgba(255, 255, 255, 0.88);
      border-radius: 20px;
      box-shadow: 0 18px 44px rgba(109, 40, 217, 0.12);
      padding: 28px;
    }
    h1 {
      margin: 0 0 6px;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      background: linear-gradient(90deg, #2563eb, #9333ea, #db2777);
      -webkit-background-clip: text;
      background-clip: text;
      color: transparent;
    }
    .subtitle { margin: 0; color: #6b7280; }
    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      background: linear-gradient(90deg, #3b82f6, #a855f7);
      transition: transform 120ms ease, filter 120ms ease;
    }
    button:hover { filter: brightness(1.05); }
    button:active { transform: scale(0.98); }
    button.ghost {
      background: white;
      color: #4b5563;
      border: 1px solid #d1d5db;
    }
    button.danger { background: linear-gradient(90deg, #ef4444, #dc2626); }
    input, textarea {
      width: 100%;
      border: 1px solid #d1d5db;
      border-radius: 10px;
      padding: 10px 12px;
      font-size: 1rem;
      font-family: inherit;
    }
    label { font-size: 0.9rem; font-weight: 600; color: #374151; display: block; margin-bottom: 6px; }
    .field { margin-bottom: 16px; }
    .status { min-height: 1.2em; font-size: 0.95rem; color: #6b7280; }
    .status[data-type="error"] { color: #b91c1c; }
    .status[data-type="ok"] { color: #15803d; }
    .grid-2 { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; }
    .grid-4 { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 16px; }
    .stat { background: white; border: 1px solid #e5e7eb; border-radius: 14px; padding: 16px; }
    .stat .label { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.1em; color: #9ca3af; }
    .stat .value { font-size: 1.6rem; font-weight: 700; color: #111827; }
    .bar { height: 8px; background: #e5e7eb; border-radius: 999px; overflow: hidden; margin-top: 10px; }
    .bar > div { height: 100%; border-radius: 999px; }
    .bar .protein { background: linear-gradient(90deg, #34d399, #10b981); }
    .bar .water { background: linear-gradient(90deg, #22d3ee, #3b82f6); }
"#;

const LANDING_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Ozempic Tracker</title>
  <style>{{CSS}}
    .hero { text-align: center; padding: 48px 28px; }
    .hero p { font-size: 1.15rem; color: #4b5563; max-width: 560px; margin: 14px auto 28px; }
    .features { text-align: left; }
    .features h3 { margin: 0 0 4px; font-size: 1.05rem; }
    .features p { margin: 0; color: #6b7280; font-size: 0.95rem; }
    .price { font-size: 2.6rem; font-weight: 800; color: #16a34a; }
  </style>
</head>
<body>
  <main class="shell">
    <section class="card hero">
      <h1>Ozempic Tracker</h1>
      <p>Acompanhe suas injecoes, proteinas e hidratacao em um so lugar.
         Graficos de progresso, lembretes de rotina e registro com fotos.</p>
      <a href="/quiz"><button>Comecar pelo quiz</button></a>
      <a href="/app"><button class="ghost">Ja sou assinante</button></a>
    </section>
    <section class="card">
      <div class="grid-4 features">
        <div class="stat"><h3>Injecoes</h3><p>Registre cada aplicacao com foto e observacoes.</p></div>
        <div class="stat"><h3>Nutricao</h3><p>Metas diarias de proteina e agua com um toque.</p></div>
        <div class="stat"><h3>Rotina</h3><p>Proxima injecao calculada automaticamente.</p></div>
        <div class="stat"><h3>Progresso</h3><p>Graficos dos ultimos 7 dias e medias gerais.</p></div>
      </div>
    </section>
    <section class="card hero">
      <p class="subtitle">Acesso completo por apenas</p>
      <div class="price">$19.90<span style="font-size:1rem;color:#6b7280">/mes</span></div>
      <a href="/checkout"><button>Assinar agora</button></a>
    </section>
  </main>
</body>
</html>
"#;

const QUIZ_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Quiz - Ozempic Tracker</title>
  <style>{{CSS}}
    .option {
      display: block;
      width: 100%;
      text-align: left;
      background: white;
      color: #1f2937;
      border: 2px solid #e5e7eb;
      border-radius: 12px;
      padding: 14px 16px;
      margin-bottom: 10px;
      font-weight: 500;
    }
    .option.selected { border-color: #9333ea; background: #faf5ff; }
    .progress { height: 8px; background: #e5e7eb; border-radius: 999px; overflow: hidden; margin: 16px 0 24px; }
    .progress > div { height: 100%; background: linear-gradient(90deg, #3b82f6, #a855f7); }
    .nav { display: flex; justify-content: space-between; margin-top: 18px; }
  </style>
</head>
<body>
  <main class="shell">
    <section class="card" id="quiz-card">
      <h1>Vamos conhecer voce</h1>
      <p class="subtitle" id="step-label"></p>
      <div class="progress"><div id="progress-bar" style="width:0%"></div></div>
      <h2 id="question"></h2>
      <div id="options"></div>
      <div class="nav">
        <button class="ghost" id="prev-btn" type="button">Voltar</button>
        <button id="next-btn" type="button" disabled>Proxima</button>
      </div>
    </section>
  </main>

  <script>
    const questions = [
      { id: 1, question: 'Voce ja utiliza Ozempic ou outro medicamento similar?',
        options: ['Sim, uso Ozempic', 'Sim, uso outro medicamento', 'Nao, mas pretendo usar', 'Nao uso e nao pretendo'] },
      { id: 2, question: 'Qual e o seu principal objetivo com o tratamento?',
        options: ['Perda de peso', 'Controle de diabetes', 'Melhoria da saude geral', 'Outro objetivo'] },
      { id: 3, question: 'Voce tem dificuldade em acompanhar suas injecoes?',
        options: ['Sim, sempre esqueco', 'As vezes esqueco', 'Raramente esqueco', 'Nunca esqueco'] },
      { id: 4, question: 'Como voce monitora sua alimentacao atualmente?',
        options: ['Nao monitoro', 'Anoto em papel', 'Uso aplicativos genericos', 'Tenho metodo proprio'] },
      { id: 5, question: 'Qual a importancia de acompanhar sua ingestao de proteinas?',
        options: ['Muito importante', 'Importante', 'Pouco importante', 'Nao sei'] },
      { id: 6, question: 'Voce bebe agua suficiente durante o dia?',
        options: ['Sim, sempre', 'Na maioria das vezes', 'Raramente', 'Nao sei dizer'] },
      { id: 7, question: 'Gostaria de visualizar seu progresso atraves de graficos?',
        options: ['Sim, seria muito util', 'Sim, mas nao e essencial', 'Nao acho necessario', 'Nao sei'] }
    ];

    let current = 0;
    const answers = {};

    const stepLabel = document.getElementById('step-label');
    const progressBar = document.getElementById('progress-bar');
    const questionEl = document.getElementById('question');
    const optionsEl = document.getElementById('options');
    const prevBtn = document.getElementById('prev-btn');
    const nextBtn = document.getElementById('next-btn');

    const render = () => {
      const q = questions[current];
      stepLabel.textContent = `Pergunta ${current + 1} de ${questions.length}`;
      progressBar.style.width = `${((current + 1) / questions.length) * 100}%`;
      questionEl.textContent = q.question;
      optionsEl.innerHTML = '';
      q.options.forEach((option) => {
        const btn = document.createElement('button');
        btn.type = 'button';
        btn.className = 'option' + (answers[q.id] === option ? ' selected' : '');
        btn.textContent = option;
        btn.addEventListener('click', () => {
          answers[q.id] = option;
          render();
        });
        optionsEl.appendChild(btn);
      });
      prevBtn.style.visibility = current === 0 ? 'hidden' : 'visible';
      nextBtn.disabled = !answers[q.id];
      nextBtn.textContent = current === questions.length - 1 ? 'Ver resultado' : 'Proxima';
    };

    const showResult = () => {
      document.getElementById('quiz-card').innerHTML = `
        <h1>Perfeito!</h1>
        <p class="subtitle">O Ozempic Tracker e ideal para voce. Assine para acessar o painel completo.</p>
        <div style="margin-top:24px"><a href="/checkout"><button>Ir para o checkout</button></a></div>
      `;
    };

    prevBtn.addEventListener('click', () => { if (current > 0) { current -= 1; render(); } });
    nextBtn.addEventListener('click', () => {
      if (current < questions.length - 1) { current += 1; render(); } else { showResult(); }
    });

    render();
  </script>
</body>
</html>
"#;

const CHECKOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Checkout - Ozempic Tracker</title>
  <style>{{CSS}}
    .summary { background: linear-gradient(90deg, #dcfce7, #d1fae5); border: 2px solid #86efac; border-radius: 14px; padding: 18px; text-align: center; margin-bottom: 20px; }
    .summary .price { font-size: 2.2rem; font-weight: 800; color: #16a34a; }
    .row { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
  </style>
</head>
<body>
  <main class="shell">
    <section class="card">
      <h1>Finalizar assinatura</h1>
      <p class="subtitle">Pagamento simulado - nenhum valor sera cobrado.</p>
      <div class="summary" style="margin-top:18px">
        <p style="margin:0" class="subtitle">Plano mensal</p>
        <div class="price">$19.90/mes</div>
      </div>
      <form id="checkout-form">
        <div class="field">
          <label for="email">Email</label>
          <input id="email" name="email" type="email" placeholder="seu@email.com" required />
        </div>
        <div class="field">
          <label for="card-number">Numero do cartao</label>
          <input id="card-number" name="card_number" inputmode="numeric" placeholder="0000 0000 0000 0000" required />
        </div>
        <div class="field">
          <label for="card-name">Nome no cartao</label>
          <input id="card-name" name="card_name" placeholder="Como impresso no cartao" required />
        </div>
        <div class="row">
          <div class="field">
            <label for="expiry">Validade</label>
            <input id="expiry" name="expiry_date" placeholder="MM/AA" required />
          </div>
          <div class="field">
            <label for="cvv">CVV</label>
            <input id="cvv" name="cvv" inputmode="numeric" placeholder="123" required />
          </div>
        </div>
        <button type="submit" style="width:100%">Assinar por $19.90/mes</button>
      </form>
      <div class="status" id="status"></div>
    </section>
  </main>

  <script>
    const form = document.getElementById('checkout-form');
    const statusEl = document.getElementById('status');
    const cardNumber = document.getElementById('card-number');
    const expiry = document.getElementById('expiry');

    cardNumber.addEventListener('input', () => {
      cardNumber.value = cardNumber.value.replace(/\s/g, '').replace(/(\d{4})/g, '$1 ').trim();
    });
    expiry.addEventListener('input', () => {
      expiry.value = expiry.value.replace(/\D/g, '').replace(/(\d{2})(\d)/, '$1/$2').slice(0, 5);
    });

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      statusEl.textContent = 'Processando pagamento...';
      statusEl.dataset.type = '';
      const payload = Object.fromEntries(new FormData(form).entries());
      try {
        const res = await fetch('/api/checkout', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(payload)
        });
        if (!res.ok) {
          throw new Error(await res.text() || 'Falha no pagamento');
        }
        statusEl.textContent = 'Pagamento processado com sucesso!';
        statusEl.dataset.type = 'ok';
        setTimeout(() => { window.location.href = '/app'; }, 1200);
      } catch (err) {
        statusEl.textContent = err.message;
        statusEl.dataset.type = 'error';
      }
    });
  </script>
</body>
</html>
"#;

const LOCK_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Assinatura necessaria - Ozempic Tracker</title>
  <style>{{CSS}}
    .lock { text-align: center; padding: 48px 28px; }
    .price { font-size: 2.4rem; font-weight: 800; color: #16a34a; margin: 10px 0; }
  </style>
</head>
<body>
  <main class="shell" style="max-width:520px">
    <section class="card lock">
      <h1>Assinatura necessaria</h1>
      <p class="subtitle">Para acessar o Ozempic Tracker, voce precisa de uma assinatura ativa.</p>
      <div class="price">$19.90<span style="font-size:1rem;color:#6b7280">/mes</span></div>
      <p class="subtitle">Acesso completo a todas as funcionalidades</p>
      <div style="margin-top:24px; display:grid; gap:12px">
        <a href="/checkout"><button style="width:100%">Assinar agora</button></a>
        <a href="/"><button class="ghost" style="width:100%">Voltar para home</button></a>
      </div>
    </section>
  </main>
</body>
</html>
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Ozempic Tracker</title>
  <style>{{CSS}}
    .topbar { display: flex; flex-wrap: wrap; justify-content: space-between; align-items: center; gap: 16px; }
    .tabs { display: flex; gap: 6px; padding: 6px; background: rgba(147, 51, 234, 0.08); border-radius: 999px; }
    .tab { background: transparent; color: #6b7280; box-shadow: none; padding: 10px 18px; }
    .tab.active { background: white; color: #7c3aed; box-shadow: 0 8px 16px rgba(124, 58, 237, 0.15); }
    .panel { display: none; }
    .panel.active { display: grid; gap: 16px; }
    .presets { display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px; margin: 12px 0; }
    .presets button { background: white; color: #047857; border: 1px solid #a7f3d0; }
    .presets.water button { color: #0369a1; border-color: #bae6fd; }
    .entry { border: 1px solid #e5e7eb; border-radius: 14px; padding: 14px; }
    .entry img { width: 100%; max-height: 180px; object-fit: cover; border-radius: 10px; margin-top: 10px; }
    .entry .notes { background: #f9fafb; border-radius: 10px; padding: 10px; font-size: 0.9rem; color: #4b5563; margin-top: 10px; }
    .entry-head { display: flex; justify-content: space-between; align-items: center; }
    svg text { font-family: inherit; }
    .chart-line { fill: none; stroke-width: 3; }
    .chart-grid { stroke: rgba(107, 114, 128, 0.2); }
    .chart-label { fill: #6b7280; font-size: 11px; }
    .muted { text-align: center; color: #9ca3af; padding: 28px 0; }
  </style>
</head>
<body>
  <main class="shell">
    <header class="card topbar">
      <div>
        <h1>Ozempic Tracker</h1>
        <p class="subtitle">Acompanhe suas injecoes, proteinas e hidratacao - {{DATE}}</p>
      </div>
      <button id="notify-btn" type="button">Ativar lembretes</button>
    </header>

    <section class="grid-4">
      <div class="stat">
        <span class="label">Ultima injecao</span>
        <span class="value" id="last-injection">{{LAST_INJECTION}}</span>
      </div>
      <div class="stat">
        <span class="label">Proteina hoje</span>
        <span class="value"><span id="protein-value">{{PROTEIN}}</span>g / {{PROTEIN_GOAL}}g</span>
        <div class="bar"><div class="protein" id="protein-bar" style="width:{{PROTEIN_PCT}}%"></div></div>
      </div>
      <div class="stat">
        <span class="label">Agua hoje</span>
        <span class="value"><span id="water-value">{{WATER}}</span>ml / {{WATER_GOAL}}ml</span>
        <div class="bar"><div class="water" id="water-bar" style="width:{{WATER_PCT}}%"></div></div>
      </div>
    </section>

    <nav class="tabs" role="tablist">
      <button class="tab active" data-tab="nutrition" type="button">Nutricao</button>
      <button class="tab" data-tab="injections" type="button">Injecoes</button>
      <button class="tab" data-tab="routine" type="button">Rotina</button>
      <button class="tab" data-tab="progress" type="button">Progresso</button>
    </nav>

    <section class="panel active card" id="panel-nutrition">
      <div class="grid-2">
        <div>
          <h2>Proteina</h2>
          <p class="subtitle">Meta diaria: {{PROTEIN_GOAL}}g</p>
          <div class="presets">
            <button type="button" data-counter="protein" data-delta="10">+10g</button>
            <button type="button" data-counter="protein" data-delta="20">+20g</button>
            <button type="button" data-counter="protein" data-delta="30">+30g</button>
          </div>
          <div style="display:flex; gap:10px; align-items:center">
            <button class="ghost" type="button" data-counter="protein" data-delta="-5">-5g</button>
            <button type="button" data-counter="protein" data-delta="5">+5g</button>
          </div>
        </div>
        <div>
          <h2>Agua</h2>
          <p class="subtitle">Meta diaria: {{WATER_GOAL}}ml</p>
          <div class="presets water">
            <button type="button" data-counter="water" data-delta="250">+250ml</button>
            <button type="button" data-counter="water" data-delta="500">+500ml</button>
            <button type="button" data-counter="water" data-delta="1000">+1000ml</button>
          </div>
          <div style="display:flex; gap:10px; align-items:center">
            <button class="ghost" type="button" data-counter="water" data-delta="-100">-100ml</button>
            <button type="button" data-counter="water" data-delta="100">+100ml</button>
          </div>
        </div>
      </div>
    </section>

    <section class="panel card" id="panel-injections">
      <h2>Registro de injecoes</h2>
      <form id="injection-form">
        <div class="field">
          <label for="injection-date">Data da aplicacao</label>
          <input id="injection-date" type="date" required />
        </div>
        <div class="field">
          <label for="injection-photo">Foto da aplicacao (opcional)</label>
          <input id="injection-photo" type="file" accept="image/*" />
        </div>
        <div class="field">
          <label for="injection-notes">Observacoes (opcional)</label>
          <textarea id="injection-notes" rows="3" placeholder="Ex: local da aplicacao, reacoes, etc."></textarea>
        </div>
        <button type="submit">Registrar injecao</button>
      </form>
      <div class="grid-2" id="injection-list"></div>
      <p class="muted" id="injection-empty">Nenhuma injecao registrada ainda</p>
    </section>

    <section class="panel card" id="panel-routine">
      <h2>Metodo de rotina</h2>
      <div id="routine-summary" style="display:none">
        <div class="grid-4">
          <div class="stat"><span class="label">Proxima injecao</span><span class="value" id="routine-next"></span></div>
          <div class="stat"><span class="label">Frequencia</span><span class="value" id="routine-frequency"></span></div>
          <div class="stat"><span class="label">Horario</span><span class="value" id="routine-time"></span></div>
          <div class="stat"><span class="label">Lembrete</span><span class="value" id="routine-reminder"></span></div>
        </div>
        <div style="display:flex; gap:10px; margin-top:16px">
          <button class="ghost" id="routine-toggle" type="button"></button>
          <button class="danger" id="routine-delete" type="button">Excluir rotina</button>
        </div>
      </div>
      <form id="routine-form" style="margin-top:16px">
        <div class="field">
          <label for="routine-frequency-input">Frequencia (dias entre injecoes)</label>
          <input id="routine-frequency-input" type="number" min="1" max="30" value="7" required />
        </div>
        <div class="field">
          <label for="routine-time-input">Horario preferido</label>
          <input id="routine-time-input" type="time" value="09:00" required />
        </div>
        <div class="field">
          <label for="routine-reminder-input">Lembrete antecipado (horas antes)</label>
          <input id="routine-reminder-input" type="number" min="1" max="72" value="24" required />
        </div>
        <button type="submit">Salvar rotina</button>
      </form>
    </section>

    <section class="panel card" id="panel-progress">
      <h2>Progresso</h2>
      <div class="grid-4">
        <div class="stat"><span class="label">Media de proteina</span><span class="value" id="avg-protein">0g</span></div>
        <div class="stat"><span class="label">Media de agua</span><span class="value" id="avg-water">0ml</span></div>
        <div class="stat"><span class="label">Meta proteina</span><span class="value" id="pct-protein">0%</span></div>
        <div class="stat"><span class="label">Meta agua</span><span class="value" id="pct-water">0%</span></div>
      </div>
      <h3>Ultimos 7 dias (% da meta)</h3>
      <svg id="chart" viewBox="0 0 600 260" role="img" aria-label="Progresso dos ultimos 7 dias"></svg>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error(await res.text() || 'Falha na requisicao');
      }
      return res.status === 204 ? null : res.json();
    };

    // Tabs
    const tabs = Array.from(document.querySelectorAll('.tab'));
    tabs.forEach((tab) => {
      tab.addEventListener('click', () => {
        tabs.forEach((t) => t.classList.toggle('active', t === tab));
        document.querySelectorAll('.panel').forEach((panel) => {
          panel.classList.toggle('active', panel.id === `panel-${tab.dataset.tab}`);
        });
      });
    });

    // Nutrition
    const updateToday = (data) => {
      document.getElementById('protein-value').textContent = data.nutrition.protein;
      document.getElementById('water-value').textContent = data.nutrition.water;
      document.getElementById('protein-bar').style.width = `${Math.min(data.protein_percent, 100)}%`;
      document.getElementById('water-bar').style.width = `${Math.min(data.water_percent, 100)}%`;
    };

    document.querySelectorAll('[data-counter]').forEach((button) => {
      button.addEventListener('click', async () => {
        try {
          const data = await api('/api/nutrition', {
            method: 'POST',
            headers: { 'content-type': 'application/json' },
            body: JSON.stringify({ counter: button.dataset.counter, delta: Number(button.dataset.delta) })
          });
          updateToday(data);
          loadStats().catch(() => {});
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
    });

    // Injections
    const injectionList = document.getElementById('injection-list');
    const injectionEmpty = document.getElementById('injection-empty');
    const injectionForm = document.getElementById('injection-form');
    const photoInput = document.getElementById('injection-photo');
    document.getElementById('injection-date').valueAsDate = new Date();

    const renderInjections = (records) => {
      injectionList.innerHTML = '';
      injectionEmpty.style.display = records.length ? 'none' : 'block';
      document.getElementById('last-injection').textContent = records.length ? records[0].date : 'Nenhuma';
      records.forEach((record) => {
        const entry = document.createElement('div');
        entry.className = 'entry';
        const head = document.createElement('div');
        head.className = 'entry-head';
        const date = document.createElement('strong');
        date.textContent = record.date;
        const del = document.createElement('button');
        del.className = 'danger';
        del.type = 'button';
        del.textContent = 'Remover';
        del.addEventListener('click', async () => {
          try {
            await api(`/api/injections/${record.id}`, { method: 'DELETE' });
            loadInjections();
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
        head.append(date, del);
        entry.appendChild(head);
        if (record.photo) {
          const img = document.createElement('img');
          img.src = record.photo;
          img.alt = 'Foto da aplicacao';
          entry.appendChild(img);
        }
        if (record.notes) {
          const notes = document.createElement('div');
          notes.className = 'notes';
          notes.textContent = record.notes;
          entry.appendChild(notes);
        }
        injectionList.appendChild(entry);
      });
    };

    const loadInjections = async () => renderInjections(await api('/api/injections'));

    const readPhoto = () => new Promise((resolve) => {
      const file = photoInput.files && photoInput.files[0];
      if (!file) {
        resolve(null);
        return;
      }
      const reader = new FileReader();
      reader.onloadend = () => resolve(reader.result);
      reader.readAsDataURL(file);
    });

    injectionForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      try {
        const photo = await readPhoto();
        await api('/api/injections', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({
            date: document.getElementById('injection-date').value,
            photo,
            notes: document.getElementById('injection-notes').value || null
          })
        });
        injectionForm.reset();
        document.getElementById('injection-date').valueAsDate = new Date();
        setStatus('Injecao registrada com sucesso!', 'ok');
        loadInjections();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    // Routine
    const routineSummary = document.getElementById('routine-summary');
    const routineForm = document.getElementById('routine-form');

    const renderRoutine = (data) => {
      if (!data.routine) {
        routineSummary.style.display = 'none';
        return;
      }
      routineSummary.style.display = 'block';
      const days = data.days_until_next;
      const when = days > 0 ? `Em ${days} dia${days > 1 ? 's' : ''}` : 'Hoje';
      document.getElementById('routine-next').textContent = `${data.routine.nextInjectionDate} (${when})`;
      document.getElementById('routine-frequency').textContent = `A cada ${data.routine.frequencyDays} dias`;
      document.getElementById('routine-time').textContent = data.routine.preferredTime;
      document.getElementById('routine-reminder').textContent = `${data.routine.reminderLeadHours}h antes`;
      document.getElementById('routine-toggle').textContent = data.routine.active ? 'Ativa - pausar' : 'Pausada - ativar';
      document.getElementById('routine-frequency-input').value = data.routine.frequencyDays;
      document.getElementById('routine-reminder-input').value = data.routine.reminderLeadHours;
    };

    const loadRoutine = async () => renderRoutine(await api('/api/routine'));

    routineForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      try {
        const data = await api('/api/routine', {
          method: 'PUT',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({
            frequency_days: Number(document.getElementById('routine-frequency-input').value),
            preferred_time: document.getElementById('routine-time-input').value,
            reminder_lead_hours: Number(document.getElementById('routine-reminder-input').value)
          })
        });
        renderRoutine(data);
        setStatus('Rotina configurada com sucesso!', 'ok');
        if ('Notification' in window && Notification.permission === 'default') {
          Notification.requestPermission();
        }
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('routine-toggle').addEventListener('click', async () => {
      try {
        renderRoutine(await api('/api/routine/toggle', { method: 'POST' }));
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('routine-delete').addEventListener('click', async () => {
      try {
        await api('/api/routine', { method: 'DELETE' });
        renderRoutine({ routine: null });
        setStatus('Rotina removida', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    // Progress
    const chartEl = document.getElementById('chart');

    const renderChart = (points) => {
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">Nenhum dado disponivel ainda</text>';
        return;
      }
      const width = 600, height = 260, paddingX = 44, paddingY = 34, top = 24;
      const values = points.flatMap((p) => [p.protein_percent, p.water_percent, 100]);
      const max = Math.max(...values);
      const xStep = points.length > 1 ? (width - paddingX * 2) / (points.length - 1) : 0;
      const x = (i) => paddingX + i * xStep;
      const y = (v) => height - paddingY - (v / max) * (height - top - paddingY);

      const line = (key, color) => {
        const path = points
          .map((p, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(2)} ${y(p[key]).toFixed(2)}`)
          .join(' ');
        return `<path class="chart-line" style="stroke:${color}" d="${path}" />`;
      };

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = (max * i) / 4;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${y(value) + 4}" text-anchor="end">${Math.round(value)}%</text>`;
      }
      const labels = points
        .map((p, i) => `<text class="chart-label" x="${x(i)}" y="${height - paddingY + 18}" text-anchor="middle">${p.date.slice(5)}</text>`)
        .join('');

      chartEl.innerHTML = `${grid}${line('protein_percent', '#10b981')}${line('water_percent', '#06b6d4')}${labels}`;
    };

    const loadStats = async () => {
      const stats = await api('/api/stats');
      document.getElementById('avg-protein').textContent = `${stats.summary.avg_protein}g`;
      document.getElementById('avg-water').textContent = `${stats.summary.avg_water}ml`;
      document.getElementById('pct-protein').textContent = `${stats.summary.pct_days_protein_goal_met}%`;
      document.getElementById('pct-water').textContent = `${stats.summary.pct_days_water_goal_met}%`;
      renderChart(stats.last_7_days);
    };

    // Reminders: permission request is fire-and-forget and only gates an
    // informational toast, never the data model.
    document.getElementById('notify-btn').addEventListener('click', async () => {
      if (!('Notification' in window)) {
        setStatus('Notificacoes nao suportadas neste navegador', 'error');
        return;
      }
      const permission = await Notification.requestPermission();
      if (permission !== 'granted') {
        setStatus('Permissao de notificacao negada', 'error');
        return;
      }
      setStatus('Notificacoes ativadas! Voce recebera lembretes.', 'ok');
      try {
        const data = await api('/api/routine');
        if (data.routine) {
          setStatus(`Proxima injecao agendada para ${data.routine.nextInjectionDate}`, 'ok');
        }
      } catch (_) {}
    });

    Promise.all([loadInjections(), loadRoutine(), loadStats()])
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
